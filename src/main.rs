use std::io::{self, Write};
use termfolio::context::Effect;
use termfolio::session::Session;

// native repl for poking at the shell without a browser. delayed effects are
// printed immediately with their delay noted, nothing actually sleeps.
fn main() {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("guest@folio:~$ ");
        stdout.flush().expect("flush stdout");
        let mut input = String::new();
        if stdin.read_line(&mut input).is_err() || input.is_empty() {
            break;
        }
        if input.trim() == "exit" {
            break;
        }
        let outcome = session.submit(&input);
        if !outcome.output.is_empty() {
            println!("{}", outcome.output);
        }
        for effect in outcome.effects {
            match effect {
                Effect::DelayedLines { delay_ms, lines } => {
                    println!("[+{}ms] {}", delay_ms, lines.join("\n"));
                }
                Effect::OpenUrl { delay_ms, url } => {
                    println!("[+{}ms] would open {}", delay_ms, url);
                }
                Effect::HttpFetch { url, kind } => {
                    println!("[fetch] {} -> {}", url, kind.fallback());
                }
                Effect::ClearScreen => print!("\x1b[2J\x1b[H"),
                Effect::Navigate(path) => println!("[navigate] {}", path),
                Effect::SetTheme(theme) => println!("[theme] {}", theme.as_str()),
                Effect::MatrixToggled(on) => println!("[matrix] {}", on),
                Effect::MusicToggled(on) => println!("[music] {}", on),
                Effect::ResetSession { delay_ms } => {
                    println!("[+{}ms] session reset", delay_ms);
                    session.reset();
                }
            }
        }
    }
}
