pub mod command_line;
pub mod viewer_command;
pub mod viewer_interpreter;
