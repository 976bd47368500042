use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::TerminalContext;
use chrono::Local;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(CalcCommand),
        Box::new(BcCommand),
        Box::new(SeqCommand),
        Box::new(RandomCommand),
    ]
}

/// Evaluate an arithmetic expression: + - * / with parens and unary minus.
/// The input is whitelisted first, so nothing resembling code ever reaches
/// the parser.
fn eval_expression(expr: &str) -> Result<f64, String> {
    if !expr
        .chars()
        .all(|c| c.is_ascii_digit() || "+-*/(). \t".contains(c))
    {
        return Err("Invalid expression".to_string());
    }
    let tokens: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if tokens.is_empty() {
        return Err("Invalid expression".to_string());
    }
    let mut pos = 0;
    let value = parse_add_sub(&tokens, &mut pos).ok_or_else(|| "Invalid expression".to_string())?;
    if pos != tokens.len() {
        return Err("Invalid expression".to_string());
    }
    if !value.is_finite() {
        return Err("division by zero".to_string());
    }
    Ok(value)
}

fn parse_add_sub(tokens: &[char], pos: &mut usize) -> Option<f64> {
    let mut left = parse_mul_div(tokens, pos)?;
    while let Some(&op) = tokens.get(*pos) {
        if op != '+' && op != '-' {
            break;
        }
        *pos += 1;
        let right = parse_mul_div(tokens, pos)?;
        left = if op == '+' { left + right } else { left - right };
    }
    Some(left)
}

fn parse_mul_div(tokens: &[char], pos: &mut usize) -> Option<f64> {
    let mut left = parse_unary(tokens, pos)?;
    while let Some(&op) = tokens.get(*pos) {
        if op != '*' && op != '/' {
            break;
        }
        *pos += 1;
        let right = parse_unary(tokens, pos)?;
        left = if op == '*' { left * right } else { left / right };
    }
    Some(left)
}

fn parse_unary(tokens: &[char], pos: &mut usize) -> Option<f64> {
    if tokens.get(*pos) == Some(&'-') {
        *pos += 1;
        return Some(-parse_unary(tokens, pos)?);
    }
    parse_atom(tokens, pos)
}

fn parse_atom(tokens: &[char], pos: &mut usize) -> Option<f64> {
    match tokens.get(*pos)? {
        '(' => {
            *pos += 1;
            let inner = parse_add_sub(tokens, pos)?;
            if tokens.get(*pos) != Some(&')') {
                return None;
            }
            *pos += 1;
            Some(inner)
        }
        c if c.is_ascii_digit() || *c == '.' => {
            let start = *pos;
            while tokens
                .get(*pos)
                .map(|c| c.is_ascii_digit() || *c == '.')
                .unwrap_or(false)
            {
                *pos += 1;
            }
            tokens[start..*pos].iter().collect::<String>().parse().ok()
        }
        _ => None,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub struct CalcCommand;

impl Command for CalcCommand {
    fn name(&self) -> &'static str {
        "calc"
    }
    fn description(&self) -> &'static str {
        "evaluate an arithmetic expression"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Math
    }
    fn usage(&self) -> &'static str {
        "calc <expression>"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let expr = if args.is_empty() {
            match stdin {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                _ => return Err(format!("usage: {}", self.usage())),
            }
        } else {
            args.join(" ")
        };
        eval_expression(&expr).map(format_number)
    }
}

/// bc - same evaluator, its own registry entry so completion offers both
pub struct BcCommand;

impl Command for BcCommand {
    fn name(&self) -> &'static str {
        "bc"
    }
    fn description(&self) -> &'static str {
        "calculator (alias for calc)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Math
    }
    fn usage(&self) -> &'static str {
        "bc <expression>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        CalcCommand.execute(args, ctx, stdin)
    }
}

/// seq [first [step]] last
pub struct SeqCommand;

impl Command for SeqCommand {
    fn name(&self) -> &'static str {
        "seq"
    }
    fn description(&self) -> &'static str {
        "print a sequence of numbers"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Math
    }
    fn usage(&self) -> &'static str {
        "seq [first [step]] last"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let nums: Vec<i64> = args
            .iter()
            .map(|a| a.parse::<i64>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("usage: {}", self.usage()))?;
        let (first, step, last) = match nums.as_slice() {
            [last] => (1, 1, *last),
            [first, last] => (*first, 1, *last),
            [first, step, last] => (*first, *step, *last),
            _ => return Err(format!("usage: {}", self.usage())),
        };
        if step == 0 {
            return Err("seq: step must not be zero".to_string());
        }
        let mut out = Vec::new();
        let mut n = first;
        while (step > 0 && n <= last) || (step < 0 && n >= last) {
            out.push(n.to_string());
            if out.len() >= 10_000 {
                break;
            }
            // the next value can sit past i64::MAX even when n <= last
            n = match n.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(out.join("\n"))
    }
}

/// random [max] - a number in [0, max), default 100. Seeded off the clock
/// with a multiplicative hash; not statistics-grade and doesn't need to be.
pub struct RandomCommand;

impl Command for RandomCommand {
    fn name(&self) -> &'static str {
        "random"
    }
    fn description(&self) -> &'static str {
        "print a random number"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Math
    }
    fn usage(&self) -> &'static str {
        "random [max]"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let max: u64 = match args.first() {
            Some(s) => match s.parse() {
                Ok(n) if n > 0 => n,
                _ => return Err(format!("usage: {}", self.usage())),
            },
            None => 100,
        };
        let seed = Local::now().timestamp_nanos_opt().unwrap_or(0) as u64;
        let mixed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        Ok(((mixed >> 33) % max).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_calc_basics() {
        let mut ctx = TerminalContext::new();
        let run = |expr: &str, ctx: &mut TerminalContext| {
            CalcCommand.execute(&[expr.to_string()], ctx, None)
        };
        assert_eq!(run("2+2", &mut ctx).unwrap(), "4");
        assert_eq!(run("2 + 3 * 4", &mut ctx).unwrap(), "14");
        assert_eq!(run("(2 + 3) * 4", &mut ctx).unwrap(), "20");
        assert_eq!(run("-5 + 2", &mut ctx).unwrap(), "-3");
        assert_eq!(run("7 / 2", &mut ctx).unwrap(), "3.5");
    }

    #[test]
    fn test_calc_rejects_anything_but_arithmetic() {
        let mut ctx = TerminalContext::new();
        for bad in ["alert(1)", "2+x", "1 && 2", "2**3", "import os"] {
            let err = CalcCommand
                .execute(&[bad.to_string()], &mut ctx, None)
                .unwrap_err();
            assert_eq!(err, "Invalid expression", "accepted: {}", bad);
        }
        assert!(CalcCommand
            .execute(&["(1+2".to_string()], &mut ctx, None)
            .is_err());
    }

    #[test]
    fn test_calc_division_by_zero() {
        let mut ctx = TerminalContext::new();
        let err = CalcCommand
            .execute(&["1/0".to_string()], &mut ctx, None)
            .unwrap_err();
        assert_eq!(err, "division by zero");
    }

    #[test]
    fn test_bc_matches_calc() {
        let mut ctx = TerminalContext::new();
        assert_eq!(
            BcCommand
                .execute(&["6*7".to_string()], &mut ctx, None)
                .unwrap(),
            "42"
        );
    }

    #[test]
    fn test_seq_forms() {
        let mut ctx = TerminalContext::new();
        let run = |args: &[&str], ctx: &mut TerminalContext| {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            SeqCommand.execute(&args, ctx, None)
        };
        assert_eq!(run(&["3"], &mut ctx).unwrap(), "1\n2\n3");
        assert_eq!(run(&["2", "4"], &mut ctx).unwrap(), "2\n3\n4");
        assert_eq!(run(&["10", "-5", "0"], &mut ctx).unwrap(), "10\n5\n0");
        assert!(run(&["1", "0", "5"], &mut ctx).is_err());
        assert!(run(&[], &mut ctx).is_err());
    }

    #[test]
    fn test_seq_stops_at_the_i64_ceiling() {
        let mut ctx = TerminalContext::new();
        let first = (i64::MAX - 1).to_string();
        let last = i64::MAX.to_string();
        let out = SeqCommand
            .execute(&[first.clone(), last.clone()], &mut ctx, None)
            .unwrap();
        assert_eq!(out, format!("{}\n{}", first, last));
        // same at the floor, stepping down
        let out = SeqCommand
            .execute(
                &[i64::MIN.to_string(), "-1".to_string(), i64::MIN.to_string()],
                &mut ctx,
                None,
            )
            .unwrap();
        assert_eq!(out, i64::MIN.to_string());
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut ctx = TerminalContext::new();
        let n: u64 = RandomCommand
            .execute(&["10".to_string()], &mut ctx, None)
            .unwrap()
            .parse()
            .unwrap();
        assert!(n < 10);
        assert!(RandomCommand
            .execute(&["0".to_string()], &mut ctx, None)
            .is_err());
    }
}
