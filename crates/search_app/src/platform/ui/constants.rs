pub const PROMPT: &str = "search> ";
pub const CMD_MORE: &str = ":more";
pub const CMD_DISMISS: &str = ":dismiss";
pub const CMD_RETRY: &str = ":retry";
pub const CMD_QUIT: &str = ":quit";
pub const CMD_HELP: &str = ":help";

pub const HELP_TEXT: &str = "Type a query and press Enter to search.\n\
  :more           load the next page\n\
  :dismiss <id>   hide one result\n\
  :retry          search the current term again\n\
  :quit           exit";
