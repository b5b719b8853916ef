use std::{
    fmt,
    io::{self, Write},
};

use super::ast::TopLevel;
use super::lexer::{Lexer, Token};
use super::parser::{Parser, ParserError};

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Summary {
    pub definitions: usize,
    pub externs: usize,
    pub expressions: usize,
    pub errors: usize,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            plural(self.definitions, "definition"),
            plural(self.externs, "extern"),
            plural(self.expressions, "expression"),
            plural(self.errors, "error")
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Settings {
    /// print `ready> ` before every top-level construct
    pub prompt: bool,
    /// print each parsed construct after its status line
    pub print_ast: bool,
}

/// reads top-level constructs until end of input, reporting each one to
/// `diagnostics` and throwing the parsed tree away
pub struct Driver<I: Iterator<Item = char>, W: Write> {
    parser: Parser<I>,
    diagnostics: W,
    settings: Settings,
    summary: Summary,
}

impl<I: Iterator<Item = char>, W: Write> Driver<I, W> {
    pub fn new(chars: I, diagnostics: W, settings: Settings) -> Self {
        Self {
            parser: Parser::new(Lexer::new(chars)),
            diagnostics,
            settings,
            summary: Summary::default(),
        }
    }

    fn prompt(&self) -> io::Result<()> {
        if self.settings.prompt {
            let mut stdout = io::stdout();
            write!(stdout, "ready> ")?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn report(&mut self, result: Result<TopLevel, ParserError>) -> io::Result<()> {
        match result {
            Ok(node) => {
                let status = match node {
                    TopLevel::Definition(_) => {
                        self.summary.definitions += 1;
                        "Parsed a function definition."
                    }
                    TopLevel::Extern(_) => {
                        self.summary.externs += 1;
                        "Parsed an extern"
                    }
                    TopLevel::Expression(_) => {
                        self.summary.expressions += 1;
                        "Parsed a top-level expr"
                    }
                };
                writeln!(self.diagnostics, "{}", status)?;
                if self.settings.print_ast {
                    writeln!(self.diagnostics, "{}", node)?;
                }
            }
            Err(err) => {
                self.summary.errors += 1;
                writeln!(self.diagnostics, "Error: {}", err)?;
                self.skip_token()?;
            }
        }
        Ok(())
    }

    // skip one token for error recovery, reporting any bad numbers passed over
    fn skip_token(&mut self) -> io::Result<()> {
        while let Err(err) = self.parser.advance().map(|_| ()) {
            self.summary.errors += 1;
            writeln!(self.diagnostics, "Error: {}", err)?;
        }
        Ok(())
    }

    /// top ::= definition | external | expression | ';'
    pub fn run(mut self) -> io::Result<Summary> {
        self.prompt()?;
        self.skip_token()?;

        loop {
            let result = match self.parser.current().clone() {
                Token::Eof => return Ok(self.summary),
                Token::Char(';') => {
                    self.skip_token()?;
                    continue;
                }
                Token::Def => self.parser.parse_definition().map(TopLevel::Definition),
                Token::Extern => self.parser.parse_extern().map(TopLevel::Extern),
                _ => self
                    .parser
                    .parse_top_level_expr()
                    .map(TopLevel::Expression),
            };
            self.report(result)?;
            self.prompt()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(input: &str, print_ast: bool) -> (Summary, String) {
        let mut out = Vec::new();
        let settings = Settings {
            prompt: false,
            print_ast,
        };
        let summary = Driver::new(input.chars(), &mut out, settings)
            .run()
            .unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn dispatches_every_construct() {
        let (summary, out) = run("def f(x) x*2; extern sin(a); f(1)+sin(2);", false);
        assert_eq!(
            summary,
            Summary {
                definitions: 1,
                externs: 1,
                expressions: 1,
                errors: 0,
            }
        );
        assert_eq!(
            out,
            "Parsed a function definition.\nParsed an extern\nParsed a top-level expr\n"
        );
    }

    #[test]
    fn prints_ast_when_asked() {
        let (_, out) = run("def f(x) x*2\n1+1", true);
        assert_eq!(
            out,
            "Parsed a function definition.\ndef f(x) (* x 2)\n\
             Parsed a top-level expr\ndef __anon_expr() (+ 1 1)\n"
        );
    }

    #[test]
    fn recovers_after_errors() {
        let (summary, out) = run("def foo 1+1; 2*3;", false);
        // `1` is skipped, leaving `+1` which fails again before `1` parses
        assert_eq!(
            summary,
            Summary {
                definitions: 0,
                externs: 0,
                expressions: 2,
                errors: 2,
            }
        );
        assert_eq!(
            out,
            "Error: Expected '(' in prototype, found 1\n\
             Error: unknown token when expecting an expression, found '+'\n\
             Parsed a top-level expr\n\
             Parsed a top-level expr\n"
        );
    }

    #[test]
    fn bad_number_mid_expression() {
        let (summary, out) = run("1 + 2..3; 4", false);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.expressions, 1);
        assert_eq!(
            out,
            "Error: invalid numeric literal 2..3\nParsed a top-level expr\n"
        );
    }

    #[test]
    fn bad_number_is_reported() {
        let (summary, out) = run("1.2.3; 4", false);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.expressions, 1);
        assert_eq!(
            out,
            "Error: invalid numeric literal 1.2.3\nParsed a top-level expr\n"
        );
    }

    #[test]
    fn summary_display() {
        let (summary, _) = run("def f(x) x; extern g(); )", false);
        assert_eq!(
            summary.to_string(),
            "1 definition, 1 extern, 0 expressions, 1 error"
        );
    }

    #[test]
    fn empty_input_does_nothing() {
        let (summary, out) = run("  # nothing here\n;;", false);
        assert_eq!(summary, Summary::default());
        assert_eq!(out, "");
    }
}
