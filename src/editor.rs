use crate::command::CommandRegistry;
use crate::mockfs::MockFileSystem;

/// Result of a tab press.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// nothing matched, leave the input alone
    None,
    /// the whole input line, rewritten with the completed last token
    Replace(String),
    /// several matches and no further common prefix: show them, keep input
    Candidates(Vec<String>),
}

/// Up arrow. `index` is -1 when not browsing; 0 is the most recent entry.
/// Stops at the oldest entry instead of wrapping.
pub fn history_up<'a>(history: &'a [String], index: &mut i32) -> Option<&'a str> {
    if history.is_empty() {
        return None;
    }
    if ((*index + 1) as usize) < history.len() {
        *index += 1;
    }
    history.get(*index as usize).map(|s| s.as_str())
}

/// Down arrow. Walks back toward -1; returns None once the cursor leaves
/// history, which means "clear the input".
pub fn history_down<'a>(history: &'a [String], index: &mut i32) -> Option<&'a str> {
    if *index <= 0 {
        *index = -1;
        return None;
    }
    *index -= 1;
    history.get(*index as usize).map(|s| s.as_str())
}

pub fn complete(input: &str, registry: &CommandRegistry, fs: &MockFileSystem) -> Completion {
    // split on plain spaces so a trailing space yields an empty last token
    let tokens: Vec<&str> = input.split(' ').collect();
    let last = *tokens.last().unwrap_or(&"");
    let completing_command = tokens.len() == 1;

    let candidates: Vec<String> = if completing_command {
        registry.command_names()
    } else {
        let cmd = tokens[0].to_lowercase();
        if cmd == "cd" || cmd == "open" {
            fs.directory_names()
        } else {
            let mut names = fs.directory_names();
            names.extend(fs.file_names());
            names.sort();
            names
        }
    };

    let typed = last.to_lowercase();
    let matches: Vec<String> = candidates
        .into_iter()
        .filter(|c| c.starts_with(&typed))
        .collect();

    match matches.len() {
        0 => Completion::None,
        1 => {
            let mut completed = matches[0].clone();
            if completing_command {
                completed.push(' ');
            }
            Completion::Replace(rebuild(&tokens, &completed))
        }
        _ => {
            let prefix = common_prefix(&matches);
            if prefix.len() > typed.len() {
                Completion::Replace(rebuild(&tokens, &prefix))
            } else {
                Completion::Candidates(matches)
            }
        }
    }
}

fn rebuild(tokens: &[&str], completed: &str) -> String {
    let mut parts: Vec<&str> = tokens[..tokens.len() - 1].to_vec();
    parts.push(completed);
    parts.join(" ")
}

fn common_prefix(matches: &[String]) -> String {
    let first = &matches[0];
    let mut len = first.len();
    for m in &matches[1..] {
        len = first
            .chars()
            .zip(m.chars())
            .take_while(|(a, b)| a == b)
            .count()
            .min(len);
    }
    first.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandRegistry;
    use crate::mockfs::MockFileSystem;

    fn setup() -> (CommandRegistry, MockFileSystem) {
        (CommandRegistry::default_commands(), MockFileSystem::new())
    }

    #[test]
    fn test_history_navigation() {
        let history = vec!["whoami".to_string(), "ls".to_string()]; // most recent first
        let mut index = -1;
        assert_eq!(history_up(&history, &mut index), Some("whoami"));
        assert_eq!(index, 0);
        assert_eq!(history_up(&history, &mut index), Some("ls"));
        assert_eq!(index, 1);
        // stops at the oldest entry
        assert_eq!(history_up(&history, &mut index), Some("ls"));
        assert_eq!(index, 1);
        assert_eq!(history_down(&history, &mut index), Some("whoami"));
        assert_eq!(history_down(&history, &mut index), None);
        assert_eq!(index, -1);
        assert_eq!(history_down(&history, &mut index), None);
    }

    #[test]
    fn test_single_command_match_appends_space() {
        let (reg, fs) = setup();
        assert_eq!(
            complete("whoa", &reg, &fs),
            Completion::Replace("whoami ".to_string())
        );
    }

    #[test]
    fn test_ambiguous_command_echoes_candidates() {
        let (reg, fs) = setup();
        // "ls" is a full name but "l" also prefixes "ln", so candidates show
        match complete("l", &reg, &fs) {
            Completion::Candidates(c) => {
                assert!(c.contains(&"ls".to_string()));
                assert!(c.contains(&"ln".to_string()));
            }
            other => panic!("expected candidates, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_prefix_with_single_match_completes() {
        let (reg, fs) = setup();
        assert_eq!(
            complete("neof", &reg, &fs),
            Completion::Replace("neofetch ".to_string())
        );
    }

    #[test]
    fn test_common_prefix_extension() {
        let (reg, fs) = setup();
        // files: about.md and anime both start with "a"; common prefix is "a"
        // so "cat ab" should land on about.md alone
        assert_eq!(
            complete("cat ab", &reg, &fs),
            Completion::Replace("cat about.md".to_string())
        );
    }

    #[test]
    fn test_cd_completes_directories_only() {
        let (reg, fs) = setup();
        assert_eq!(
            complete("cd bl", &reg, &fs),
            Completion::Replace("cd blogs".to_string())
        );
        // "cd a" must not offer about.md, only anime
        assert_eq!(
            complete("cd a", &reg, &fs),
            Completion::Replace("cd anime".to_string())
        );
    }

    #[test]
    fn test_zero_matches_is_noop() {
        let (reg, fs) = setup();
        assert_eq!(complete("xyzzy", &reg, &fs), Completion::None);
        assert_eq!(complete("cat zzz", &reg, &fs), Completion::None);
    }

    #[test]
    fn test_completion_case_insensitive_prefix() {
        let (reg, fs) = setup();
        assert_eq!(
            complete("cat ABOUT", &reg, &fs),
            Completion::Replace("cat about.md".to_string())
        );
    }

    #[test]
    fn test_aliases_are_ordinary_candidates() {
        let (reg, fs) = setup();
        // cls is registered independently of clear, so "cl" is ambiguous
        match complete("cl", &reg, &fs) {
            Completion::Candidates(c) => {
                assert!(c.contains(&"clear".to_string()));
                assert!(c.contains(&"cls".to_string()));
            }
            other => panic!("expected candidates, got {:?}", other),
        }
    }
}
