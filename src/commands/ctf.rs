use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![Box::new(SudoCommand), Box::new(Base64Command)]
}

pub const FLAG: &str = "flag{w3lc0me_t0_th3_m4ch1n3}";
const SUDO_SECRET: &str = "hunter2";
const RICKROLL_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// sudo <password> - the password is buried in .secret, base64'd next to the
/// flag. Unlocking flips `sudo_unlocked`, which makes .root_flag readable.
pub struct SudoCommand;

impl Command for SudoCommand {
    fn name(&self) -> &'static str {
        "sudo"
    }
    fn description(&self) -> &'static str {
        "execute a command as root (good luck)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "sudo <password>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        if args.is_empty() {
            return Err(format!("usage: {}", self.usage()));
        }
        if args.len() == 1 && args[0] == SUDO_SECRET {
            ctx.sudo_unlocked = true;
            ctx.say_later(
                900,
                vec![
                    "ACCESS GRANTED.".to_string(),
                    "you are now in the wheel group. try `cat .root_flag`.".to_string(),
                ],
            );
            Ok("verifying credentials...".to_string())
        } else {
            ctx.say_later(
                400,
                vec!["guest is not in the sudoers file. This incident will be reported.".to_string()],
            );
            Ok("[sudo] password for guest:".to_string())
        }
    }
}

/// base64 [-d] <text> - decoding the exact flag ciphertext is the win
/// condition, everything else is an honest codec.
pub struct Base64Command;

impl Command for Base64Command {
    fn name(&self) -> &'static str {
        "base64"
    }
    fn description(&self) -> &'static str {
        "encode or decode base64"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "base64 [-d] <text>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let (decode, rest) = match args.first().map(|s| s.as_str()) {
            Some("-d") => (true, &args[1..]),
            _ => (false, args),
        };
        let text = if rest.is_empty() {
            match stdin {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                _ => return Err(format!("usage: {}", self.usage())),
            }
        } else {
            rest.join(" ")
        };

        if !decode {
            return Ok(STANDARD.encode(text.as_bytes()));
        }

        let bytes = STANDARD
            .decode(text.as_bytes())
            .map_err(|_| "base64: invalid input".to_string())?;
        let decoded =
            String::from_utf8(bytes).map_err(|_| "base64: invalid input".to_string())?;

        if decoded == FLAG {
            ctx.say_later(
                1200,
                vec![
                    "..wait. you actually found it.".to_string(),
                    "initiating victory protocol...".to_string(),
                ],
            );
            ctx.say_later(
                2400,
                vec!["deploying reward payload in 3... 2... 1...".to_string()],
            );
            ctx.emit(Effect::OpenUrl {
                delay_ms: 3000,
                url: RICKROLL_URL.to_string(),
            });
            return Ok(format!(
                "{}\n\nCONGRATULATIONS. flag captured.",
                decoded
            ));
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_sudo_unlocks_on_the_secret() {
        let mut ctx = TerminalContext::new();
        let out = SudoCommand
            .execute(&[SUDO_SECRET.to_string()], &mut ctx, None)
            .unwrap();
        assert!(ctx.sudo_unlocked);
        assert_eq!(out, "verifying credentials...");
        assert!(matches!(
            ctx.effects.as_slice(),
            [Effect::DelayedLines { delay_ms: 900, .. }]
        ));
    }

    #[test]
    fn test_sudo_wrong_password_reports_the_incident() {
        let mut ctx = TerminalContext::new();
        SudoCommand
            .execute(&["password123".to_string()], &mut ctx, None)
            .unwrap();
        assert!(!ctx.sudo_unlocked);
        match ctx.effects.as_slice() {
            [Effect::DelayedLines { delay_ms: 400, lines }] => {
                assert!(lines[0].contains("not in the sudoers file"));
            }
            other => panic!("unexpected effects: {:?}", other),
        }
        assert!(SudoCommand.execute(&[], &mut ctx, None).is_err());
    }

    #[test]
    fn test_base64_round_trip() {
        let mut ctx = TerminalContext::new();
        let enc = Base64Command
            .execute(&["hello".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(enc, "aGVsbG8=");
        let dec = Base64Command
            .execute(&["-d".to_string(), enc], &mut ctx, None)
            .unwrap();
        assert_eq!(dec, "hello");
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn test_base64_rejects_garbage() {
        let mut ctx = TerminalContext::new();
        let err = Base64Command
            .execute(&["-d".to_string(), "!!!".to_string()], &mut ctx, None)
            .unwrap_err();
        assert_eq!(err, "base64: invalid input");
    }

    #[test]
    fn test_decoding_the_flag_triggers_the_reward() {
        let mut ctx = TerminalContext::new();
        let cipher = STANDARD.encode(FLAG.as_bytes());
        // the ciphertext the .secret file carries
        assert_eq!(cipher, "ZmxhZ3t3M2xjMG1lX3QwX3RoM19tNGNoMW4zfQ==");
        let out = Base64Command
            .execute(&["-d".to_string(), cipher], &mut ctx, None)
            .unwrap();
        assert!(out.contains(FLAG));
        assert!(out.contains("CONGRATULATIONS"));
        assert!(ctx.effects.iter().any(|e| matches!(
            e,
            Effect::OpenUrl { delay_ms: 3000, .. }
        )));
    }

    #[test]
    fn test_only_the_exact_flag_is_rewarded() {
        let mut ctx = TerminalContext::new();
        let near_miss = STANDARD.encode("flag{w3lc0me}");
        let out = Base64Command
            .execute(&["-d".to_string(), near_miss], &mut ctx, None)
            .unwrap();
        assert_eq!(out, "flag{w3lc0me}");
        assert!(ctx.effects.is_empty());
    }
}
