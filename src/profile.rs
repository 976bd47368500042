//! Static portfolio data printed by the info commands. Editing this file is
//! how the site owner changes what `whoami`, `skills` and friends say.

pub const NAME: &str = "Aria Okabe";
pub const HANDLE: &str = "aria";
pub const HOST: &str = "folio";
pub const ROLE: &str = "Systems & Web Developer";
pub const LOCATION: &str = "Osaka, JP (UTC+9)";
pub const GITHUB_USER: &str = "ariaokabe";
pub const GITHUB_URL: &str = "https://github.com/ariaokabe";
pub const EMAIL: &str = "aria@folio.dev";
pub const SITE_VERSION: &str = "2.3.0";

/// (skill, proficiency percent) - rendered as bars by `skills`
pub const SKILLS: &[(&str, u8)] = &[
    ("Rust", 92),
    ("TypeScript", 88),
    ("WebAssembly", 80),
    ("React", 78),
    ("PostgreSQL", 70),
    ("Docker", 66),
    ("Go", 55),
];

/// (name, stack, one-liner)
pub const PROJECTS: &[(&str, &str, &str)] = &[
    (
        "termfolio",
        "Rust, wasm-bindgen",
        "this terminal - a fake shell compiled to WebAssembly",
    ),
    (
        "inkwell-notes",
        "TypeScript, CRDTs",
        "local-first markdown notes with live sync",
    ),
    (
        "shutterlog",
        "Rust, axum, PostgreSQL",
        "photo metadata catalogue for film scans",
    ),
    (
        "pico-synth",
        "Rust, embedded",
        "4-voice wavetable synth on a microcontroller",
    ),
];

pub const FORTUNES: &[&str] = &[
    "A bug in the hand is worth two in production.",
    "There is no place like 127.0.0.1.",
    "Weeks of coding can save you hours of planning.",
    "It works on my machine. We ship your machine now.",
    "The best error message is the one that never shows up.",
    "Real programmers count from 0.",
];

pub const JOKE_FALLBACK: &str =
    "Why do programmers prefer dark mode? Because light attracts bugs.";

pub const QUOTE_FALLBACK: &str =
    "\"Simplicity is prerequisite for reliability.\" - Edsger W. Dijkstra";
