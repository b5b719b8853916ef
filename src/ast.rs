use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<String>,
}

impl Prototype {
    /// the nameless, parameterless prototype wrapped around a bare expression
    pub fn anonymous() -> Self {
        Self {
            name: String::new(),
            args: Vec::new(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Binary(char, Box<Expression>, Box<Expression>),
    Call(String, Vec<Expression>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TopLevel {
    Definition(Function),
    Extern(Prototype),
    Expression(Function),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(num) => write!(f, "{}", num),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary(op, lhs, rhs) => write!(f, "({} {} {})", op, lhs, rhs),
            Expression::Call(callee, args) => {
                write!(f, "(call {}", callee)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_anonymous() {
            "__anon_expr"
        } else {
            &self.name
        };
        write!(f, "{}({})", name, self.args.join(" "))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def {} {}", self.prototype, self.body)
    }
}

impl fmt::Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevel::Definition(func) | TopLevel::Expression(func) => write!(f, "{}", func),
            TopLevel::Extern(proto) => write!(f, "extern {}", proto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Box<Expression> {
        Box::new(Expression::Variable(name.to_string()))
    }

    #[test]
    fn expression_display() {
        let expr = Expression::Binary(
            '+',
            var("x"),
            Box::new(Expression::Call(
                "foo".to_string(),
                vec![Expression::Number(1.5), *var("y")],
            )),
        );
        assert_eq!(expr.to_string(), "(+ x (call foo 1.5 y))");
        assert_eq!(
            Expression::Call("bar".to_string(), vec![]).to_string(),
            "(call bar)"
        );
    }

    #[test]
    fn function_display() {
        let func = Function {
            prototype: Prototype {
                name: "add".to_string(),
                args: vec!["a".to_string(), "b".to_string()],
            },
            body: Expression::Binary('+', var("a"), var("b")),
        };
        assert_eq!(func.to_string(), "def add(a b) (+ a b)");
        assert_eq!(
            TopLevel::Extern(func.prototype.clone()).to_string(),
            "extern add(a b)"
        );
    }

    #[test]
    fn anonymous_prototype() {
        let proto = Prototype::anonymous();
        assert!(proto.is_anonymous());
        assert!(proto.args.is_empty());
        assert_eq!(proto.to_string(), "__anon_expr()");
    }
}
