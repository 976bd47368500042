use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext};
use crate::mockfs::FsEntry;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(CdCommand),
        Box::new(OpenCommand),
        Box::new(PwdCommand),
        Box::new(LsCommand),
        Box::new(TreeCommand),
        Box::new(FindCommand),
    ]
}

/// cd [directory]
/// The "filesystem" directories double as site sections, so cd navigates.
pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn description(&self) -> &'static str {
        "change directory (navigates to a site section)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "cd [directory]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let target = args.first().map(|s| s.as_str()).unwrap_or("~");
        match target {
            "~" | "/" | "." | ".." => {
                ctx.emit(Effect::Navigate("/".to_string()));
                Ok(String::new())
            }
            dir => {
                if ctx.fs.is_directory(dir) {
                    ctx.emit(Effect::Navigate(format!("/{}", dir.to_lowercase())));
                    Ok(String::new())
                } else if ctx.fs.file_exists(dir) {
                    Err(format!("cd: {}: Not a directory", dir))
                } else {
                    Err(format!("cd: {}: No such file or directory", dir))
                }
            }
        }
    }
}

/// open <section> - cd with a friendlier name
pub struct OpenCommand;

impl Command for OpenCommand {
    fn name(&self) -> &'static str {
        "open"
    }
    fn description(&self) -> &'static str {
        "open a site section"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "open <section>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let section = match args.first() {
            Some(s) => s,
            None => return Err(format!("usage: {}", self.usage())),
        };
        if ctx.fs.is_directory(section) {
            let route = format!("/{}", section.to_lowercase());
            ctx.emit(Effect::Navigate(route.clone()));
            Ok(format!("opening {} ...", route))
        } else {
            Err(format!("open: {}: no such section", section))
        }
    }
}

pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn description(&self) -> &'static str {
        "print working directory"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "pwd"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok("/home/guest".to_string())
    }
}

/// ls [-l] [-a] [path]
pub struct LsCommand;

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }
    fn description(&self) -> &'static str {
        "list directory contents"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "ls [-l] [-a] [path]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let mut long = false;
        let mut all = false;
        let mut path: Option<&str> = None;
        for arg in args {
            match arg.as_str() {
                "-l" => long = true,
                "-a" => all = true,
                "-la" | "-al" => {
                    long = true;
                    all = true;
                }
                s if s.starts_with('-') => {
                    return Err(format!("ls: invalid option '{}'", s));
                }
                s => path = Some(s),
            }
        }

        let target = path.unwrap_or("");
        let is_root = matches!(target, "" | "." | "~" | "/");
        if !is_root && !ctx.fs.is_directory(target) {
            // ls on a plain file just echoes its name, like the real thing
            if ctx.fs.file_exists(target) {
                return Ok(target.to_lowercase());
            }
            return Err(format!("ls: cannot access '{}': No such file or directory", target));
        }

        let names: Vec<String> = ctx
            .fs
            .get_directory_content(target)
            .into_iter()
            .filter(|n| all || !n.starts_with('.'))
            .collect();

        if !long {
            return Ok(names.join("  "));
        }

        let mut lines = Vec::new();
        lines.push(format!("total {}", names.len()));
        for name in names {
            let line = match ctx.fs.entry(&name) {
                Some(FsEntry::File(f)) => format!(
                    "{} 1 {} {} {:>5} {} {}",
                    f.permissions, f.owner, f.group, f.size, f.modified, name
                ),
                Some(FsEntry::Directory(d)) => format!(
                    "{} 2 {} {} {:>5} {} {}",
                    d.permissions, d.owner, d.group, 4096, d.modified, name
                ),
                // shelf children have no table entry, so show defaults
                None => format!("-rw-r--r-- 1 aria aria  1024 Jan 01 00:00 {}", name),
            };
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

/// tree - root plus shelves, one level deep (the fs has no deeper nesting)
pub struct TreeCommand;

impl Command for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }
    fn description(&self) -> &'static str {
        "list contents as a tree"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "tree"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let mut lines = vec![".".to_string()];
        let entries: Vec<String> = ctx
            .fs
            .get_directory_content("")
            .into_iter()
            .filter(|n| !n.starts_with('.'))
            .collect();
        let mut dirs = 0;
        let mut files = 0;
        for (i, name) in entries.iter().enumerate() {
            let last = i == entries.len() - 1;
            let branch = if last { "└── " } else { "├── " };
            lines.push(format!("{}{}", branch, name));
            if ctx.fs.is_directory(name) {
                dirs += 1;
                let children = ctx.fs.get_directory_content(name);
                let pad = if last { "    " } else { "│   " };
                for (j, child) in children.iter().enumerate() {
                    files += 1;
                    let cbranch = if j == children.len() - 1 {
                        "└── "
                    } else {
                        "├── "
                    };
                    lines.push(format!("{}{}{}", pad, cbranch, child));
                }
            } else {
                files += 1;
            }
        }
        lines.push(String::new());
        lines.push(format!("{} directories, {} files", dirs, files));
        Ok(lines.join("\n"))
    }
}

/// find [-name pattern] - glob match over every known path
pub struct FindCommand;

impl Command for FindCommand {
    fn name(&self) -> &'static str {
        "find"
    }
    fn description(&self) -> &'static str {
        "search for files by name"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Navigation
    }
    fn usage(&self) -> &'static str {
        "find [-name <pattern>]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let pattern = match args.first().map(|s| s.as_str()) {
            None => None,
            Some("-name") => match args.get(1) {
                Some(p) => Some(p.as_str()),
                None => return Err(format!("usage: {}", self.usage())),
            },
            Some(p) => Some(p),
        };

        let mut paths = Vec::new();
        for name in ctx.fs.get_directory_content("") {
            if ctx.fs.is_directory(&name) {
                paths.push(format!("./{}", name));
                for child in ctx.fs.get_directory_content(&name) {
                    paths.push(format!("./{}/{}", name, child));
                }
            } else {
                paths.push(format!("./{}", name));
            }
        }

        let matched: Vec<String> = match pattern {
            None => paths,
            Some(glob) => {
                // translate the shell glob into an anchored regex
                let escaped = regex::escape(glob).replace("\\*", ".*").replace("\\?", ".");
                let re = regex::Regex::new(&format!("^{}$", escaped))
                    .map_err(|e| format!("find: bad pattern: {}", e))?;
                paths
                    .into_iter()
                    .filter(|p| {
                        let base = p.rsplit('/').next().unwrap_or(p);
                        re.is_match(base)
                    })
                    .collect()
            }
        };

        if matched.is_empty() {
            Ok("find: no matches".to_string())
        } else {
            Ok(matched.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_cd_known_directory_navigates() {
        let mut ctx = TerminalContext::new();
        let out = CdCommand
            .execute(&["blogs".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(out, "");
        assert_eq!(ctx.effects, vec![Effect::Navigate("/blogs".to_string())]);
    }

    #[test]
    fn test_cd_unknown_directory_errors() {
        let mut ctx = TerminalContext::new();
        let err = CdCommand
            .execute(&["warp".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.contains("No such file or directory"));
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn test_cd_file_is_not_a_directory() {
        let mut ctx = TerminalContext::new();
        let err = CdCommand
            .execute(&["about.md".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.contains("Not a directory"));
    }

    #[test]
    fn test_ls_hides_dotfiles_by_default() {
        let mut ctx = TerminalContext::new();
        let plain = LsCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(!plain.contains(".secret"));
        let all = LsCommand
            .execute(&["-a".to_string()], &mut ctx, None)
            .unwrap();
        assert!(all.contains(".secret"));
        assert!(all.contains(".root_flag"));
    }

    #[test]
    fn test_ls_long_format_uses_metadata() {
        let mut ctx = TerminalContext::new();
        let out = LsCommand
            .execute(&["-l".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("-rw-r--r--"));
        assert!(out.contains("drwxr-xr-x"));
    }

    #[test]
    fn test_ls_shelf_directory() {
        let mut ctx = TerminalContext::new();
        let out = LsCommand
            .execute(&["anime".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("steins-gate.md"));
    }

    #[test]
    fn test_find_glob() {
        let mut ctx = TerminalContext::new();
        let out = FindCommand
            .execute(&["-name".to_string(), "*.json".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(out, "./skills.json");
        let none = FindCommand
            .execute(&["-name".to_string(), "*.exe".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(none, "find: no matches");
    }

    #[test]
    fn test_tree_counts() {
        let mut ctx = TerminalContext::new();
        let out = TreeCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(out.contains("5 directories"));
        assert!(out.contains("blogs"));
    }
}
