use crate::command::Command;

pub mod ctf;
pub mod dev;
pub mod environment;
pub mod file;
pub mod fun;
pub mod math;
pub mod navigation;
pub mod network;
pub mod system;
pub mod text;
pub mod utility;

/// One vector per category module. The registry is the merge of these; a name
/// claimed by two groups fails the uniqueness test in command.rs.
pub fn all_groups() -> Vec<Vec<Box<dyn Command + Send + Sync>>> {
    vec![
        navigation::commands(),
        file::commands(),
        text::commands(),
        system::commands(),
        network::commands(),
        dev::commands(),
        fun::commands(),
        utility::commands(),
        environment::commands(),
        math::commands(),
        ctf::commands(),
    ]
}
