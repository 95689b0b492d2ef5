pub type CmdResult<T> = file_sanitizer::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod name;
pub mod tree;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (file_sanitizer::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Tree(args) => dispatch!(args, global, tree),
        crate::Commands::Name(args) => dispatch!(args, global, name),
    }
}
