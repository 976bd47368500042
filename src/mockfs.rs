use std::collections::HashMap;

/// The static, read-only filesystem the file commands operate over. There is
/// deliberately no write API: every mutating command replies with a denial
/// instead of touching state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockFile {
    pub size: u64,
    pub permissions: &'static str,
    pub owner: &'static str,
    pub group: &'static str,
    pub modified: &'static str,
    pub content: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockDirectory {
    pub permissions: &'static str,
    pub owner: &'static str,
    pub group: &'static str,
    pub modified: &'static str,
    pub children: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FsEntry {
    File(MockFile),
    Directory(MockDirectory),
}

#[derive(Debug, Clone)]
pub struct MockFileSystem {
    entries: HashMap<&'static str, FsEntry>,
}

const ABOUT_MD: &[&str] = &[
    "# About",
    "",
    "Hi, I'm Aria - a systems and web developer from Osaka.",
    "I spend most of my time somewhere between Rust and the browser,",
    "usually trying to make the two talk to each other.",
    "",
    "This whole site is a WebAssembly binary pretending to be a shell.",
    "Poke around. `ls`, `cat`, `help` - the usual suspects all work.",
];

const README_MD: &[&str] = &[
    "# termfolio",
    "",
    "A portfolio that boots into a terminal instead of a landing page.",
    "",
    "- type `help` for the command list",
    "- `cd blogs` or `open books` to browse the shelves",
    "- everything here is read-only, so `rm` away",
    "",
    "Rumour has it there's a flag hidden somewhere.",
];

const CONTACT_MD: &[&str] = &[
    "# Contact",
    "",
    "email:   aria@folio.dev",
    "github:  https://github.com/ariaokabe",
    "rss:     /feed.xml",
    "",
    "Fastest response: email. Slowest: carrier pigeon.",
];

const RESUME_MD: &[&str] = &[
    "# Resume (short form)",
    "",
    "2023-now   Senior Engineer, distributed storage team",
    "2020-2023  Backend Engineer, payments infrastructure",
    "2018-2020  Frontend Developer, design tooling startup",
    "",
    "Full PDF available on request - or just `cat skills.json`.",
];

const SKILLS_JSON: &[&str] = &[
    "{",
    "  \"languages\": [\"rust\", \"typescript\", \"go\", \"sql\"],",
    "  \"runtime\": [\"wasm\", \"tokio\", \"node\"],",
    "  \"infra\": [\"postgres\", \"docker\", \"nix\"],",
    "  \"editor\": \"helix, fight me\"",
    "}",
];

const PROJECTS_MD: &[&str] = &[
    "# Projects",
    "",
    "termfolio      this terminal (rust + wasm-bindgen)",
    "inkwell-notes  local-first markdown notes (crdt sync)",
    "shutterlog     film scan metadata catalogue (axum + postgres)",
    "pico-synth     4-voice wavetable synth on a microcontroller",
    "",
    "Run `projects` for the long-form version.",
];

const MUSIC_MD: &[&str] = &[
    "# Now playing",
    "",
    "A small lo-fi playlist lives behind the `music` command.",
    "It keeps playing while you type. That's the whole feature.",
];

const BASHRC: &[&str] = &[
    "# ~/.bashrc - not actually sourced by anything",
    "alias please='sudo'",
    "alias yeet='rm -rf'",
    "alias inspire='fortune | cowsay'",
    "export PS1='guest@folio:~$ '",
];

const SECRET: &[&str] = &[
    "you found the breadcrumbs. good.",
    "",
    "the machine speaks in base64:",
    "ZmxhZ3t3M2xjMG1lX3QwX3RoM19tNGNoMW4zfQ==",
    "",
    "decode it and see what happens.",
];

const ROOT_FLAG: &[&str] = &[
    "FLAG{r00t_4cc3ss_gr4nt3d}",
    "",
    "root never logged out. neither will you.",
];

const DIR_MODIFIED: &str = "Mar 14 09:26";

/// (name, entry) pairs the table is built from. Keys must be lower-case.
fn seed_entries() -> Vec<(&'static str, FsEntry)> {
    let file = |size, modified, content| {
        FsEntry::File(MockFile {
            size,
            permissions: "-rw-r--r--",
            owner: "aria",
            group: "aria",
            modified,
            content,
        })
    };
    let dir = |children| {
        FsEntry::Directory(MockDirectory {
            permissions: "drwxr-xr-x",
            owner: "aria",
            group: "aria",
            modified: DIR_MODIFIED,
            children,
        })
    };
    vec![
        ("about.md", file(412, "Jun 02 21:14", ABOUT_MD)),
        ("readme.md", file(338, "Jun 02 21:14", README_MD)),
        ("contact.md", file(196, "May 28 18:03", CONTACT_MD)),
        ("resume.md", file(301, "May 11 10:42", RESUME_MD)),
        ("skills.json", file(168, "May 11 10:40", SKILLS_JSON)),
        ("projects.md", file(347, "Jun 01 23:55", PROJECTS_MD)),
        ("music.md", file(142, "Apr 19 14:20", MUSIC_MD)),
        (
            ".bashrc",
            FsEntry::File(MockFile {
                size: 151,
                permissions: "-rw-------",
                owner: "aria",
                group: "aria",
                modified: "Jan 07 08:12",
                content: BASHRC,
            }),
        ),
        (
            ".secret",
            FsEntry::File(MockFile {
                size: 139,
                permissions: "-r--------",
                owner: "aria",
                group: "aria",
                modified: "Jan 01 00:00",
                content: SECRET,
            }),
        ),
        (
            ".root_flag",
            FsEntry::File(MockFile {
                size: 74,
                permissions: "-r--------",
                owner: "root",
                group: "root",
                modified: "Jan 01 00:00",
                content: ROOT_FLAG,
            }),
        ),
        (
            "blogs",
            dir(&["hello-world.md", "why-rust.md", "building-this-site.md"]),
        ),
        ("papers", dir(&["raft-notes.md", "crdt-survey.md"])),
        (
            "books",
            dir(&["dune.md", "snow-crash.md", "the-pragmatic-programmer.md"]),
        ),
        (
            "anime",
            dir(&["steins-gate.md", "frieren.md", "cowboy-bebop.md"]),
        ),
        (
            "hobby",
            dir(&["photography.md", "mechanical-keyboards.md", "bouldering.md"]),
        ),
    ]
}

impl MockFileSystem {
    pub fn new() -> Self {
        let entries: HashMap<&'static str, FsEntry> = seed_entries().into_iter().collect();
        Self { entries }
    }

    /// strip `./` / `~/` prefixes and lower-case, so `cat ./About.md` works
    fn normalize(name: &str) -> String {
        let name = name.trim();
        let name = name
            .strip_prefix("./")
            .or_else(|| name.strip_prefix("~/"))
            .unwrap_or(name);
        name.to_lowercase()
    }

    pub fn entry(&self, name: &str) -> Option<&FsEntry> {
        self.entries.get(Self::normalize(name).as_str())
    }

    /// content lines, or None if absent or a directory
    pub fn get_file_content(&self, name: &str) -> Option<&'static [&'static str]> {
        match self.entry(name) {
            Some(FsEntry::File(f)) => Some(f.content),
            _ => None,
        }
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn is_directory(&self, name: &str) -> bool {
        matches!(self.entry(name), Some(FsEntry::Directory(_)))
    }

    /// Classification by extension only. Intentionally does not consult the
    /// table, so it will happily describe files that don't exist.
    pub fn get_file_type(&self, name: &str) -> String {
        let name = Self::normalize(name);
        if name.ends_with(".md") {
            "Markdown document, UTF-8 Unicode text".to_string()
        } else if name.ends_with(".json") {
            "JSON data".to_string()
        } else if name.starts_with('.') {
            "ASCII text".to_string()
        } else {
            "data".to_string()
        }
    }

    /// root (`""`, `.`, `~`, `/`) lists the whole table; the named shelves
    /// return their hardcoded children; everything else is empty.
    pub fn get_directory_content(&self, path: &str) -> Vec<String> {
        let path = Self::normalize(path);
        match path.as_str() {
            "" | "." | "~" | "/" => {
                let mut names: Vec<String> =
                    self.entries.keys().map(|k| k.to_string()).collect();
                names.sort();
                names
            }
            other => match self.entries.get(other) {
                Some(FsEntry::Directory(d)) => {
                    d.children.iter().map(|c| c.to_string()).collect()
                }
                _ => Vec::new(),
            },
        }
    }

    pub fn directory_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| matches!(e, FsEntry::Directory(_)))
            .map(|(k, _)| k.to_string())
            .collect();
        names.sort();
        names
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| matches!(e, FsEntry::File(_)))
            .map(|(k, _)| k.to_string())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_file_has_content() {
        let fs = MockFileSystem::new();
        for name in fs.file_names() {
            let content = fs.get_file_content(&name);
            assert!(content.is_some(), "no content for {}", name);
            assert!(!content.unwrap().is_empty(), "empty content for {}", name);
        }
    }

    #[test]
    fn test_prefix_normalization_round_trip() {
        let fs = MockFileSystem::new();
        for name in fs.file_names() {
            let plain = fs.get_file_content(&name);
            assert_eq!(plain, fs.get_file_content(&format!("./{}", name)));
            assert_eq!(plain, fs.get_file_content(&format!("~/{}", name)));
        }
        assert!(fs.get_file_content("nonexistent_ghost_file").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let fs = MockFileSystem::new();
        assert!(fs.file_exists("About.MD"));
        assert_eq!(
            fs.get_file_content("about.md"),
            fs.get_file_content("ABOUT.md")
        );
    }

    #[test]
    fn test_directories_return_none_content() {
        let fs = MockFileSystem::new();
        assert!(fs.file_exists("blogs"));
        assert!(fs.is_directory("blogs"));
        assert!(fs.get_file_content("blogs").is_none());
    }

    #[test]
    fn test_root_listing_is_sorted_table() {
        let fs = MockFileSystem::new();
        let root = fs.get_directory_content("");
        let mut sorted = root.clone();
        sorted.sort();
        assert_eq!(root, sorted);
        assert!(root.contains(&"about.md".to_string()));
        assert!(root.contains(&"blogs".to_string()));
        assert_eq!(root, fs.get_directory_content("~"));
        assert_eq!(root, fs.get_directory_content("."));
    }

    #[test]
    fn test_shelf_listing_is_hardcoded() {
        let fs = MockFileSystem::new();
        let blogs = fs.get_directory_content("blogs");
        assert_eq!(
            blogs,
            vec!["hello-world.md", "why-rust.md", "building-this-site.md"]
        );
        assert!(fs.get_directory_content("no_such_dir").is_empty());
    }

    #[test]
    fn test_file_type_ignores_table() {
        let fs = MockFileSystem::new();
        assert_eq!(
            fs.get_file_type("ghost.md"),
            "Markdown document, UTF-8 Unicode text"
        );
        assert_eq!(fs.get_file_type("skills.json"), "JSON data");
        assert_eq!(fs.get_file_type(".bashrc"), "ASCII text");
        assert_eq!(fs.get_file_type("mystery"), "data");
    }
}
