use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViewerCommand {
    Open(Option<PathBuf>),  // `None`: nothing chosen, keep the current trace
    ListSearches,
    SelectSearch(usize),
    ListTrees,
    SelectTree(usize),
    Child(usize),  // position in the child listing
    Back,
    Show,
    Json,  // dump the current node as JSON
    Help,
    Quit,
}

pub trait CommandInterpreter {
    fn line_to_command(line: &str) -> Option<ViewerCommand>;
}

pub const HELP: &str = "\
open <path>     open a search trace DB
searches        list searches
search <n>      select search n
trees           list trees of the selected search
tree <n>        select tree n
<n> | child <n> descend to child n
back            go to the parent node
show            redraw the current node
json            print the current node as JSON
help            this text
quit            exit";
