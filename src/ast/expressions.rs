use crate::frontend::token::TokenKind;
use std::fmt;

pub type Ident = String;

/// Dot-separated, non-empty name such as `x` or `InOut.WriteInt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qualident {
    pub segments: Vec<Ident>,
}

impl Qualident {
    pub fn new(segments: Vec<Ident>) -> Self {
        Self { segments }
    }

    pub fn simple(name: impl Into<Ident>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Build from a dotted path, e.g. `"InOut.WriteInt"`.
    pub fn path(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for Qualident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Plus,
    Minus,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Times,
    Slash,
    Div,
    Mod,
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl RelOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Equal => RelOp::Equal,
            TokenKind::Hash => RelOp::NotEqual,
            TokenKind::Less => RelOp::Less,
            TokenKind::LessEqual => RelOp::LessEqual,
            TokenKind::Greater => RelOp::Greater,
            TokenKind::GreaterEqual => RelOp::GreaterEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn token(&self) -> TokenKind {
        match self {
            RelOp::Equal => TokenKind::Equal,
            RelOp::NotEqual => TokenKind::Hash,
            RelOp::Less => TokenKind::Less,
            RelOp::LessEqual => TokenKind::LessEqual,
            RelOp::Greater => TokenKind::Greater,
            RelOp::GreaterEqual => TokenKind::GreaterEqual,
        }
    }
}

impl AddOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(AddOp::Plus),
            TokenKind::Minus => Some(AddOp::Minus),
            TokenKind::Or => Some(AddOp::Or),
            _ => None,
        }
    }

    pub fn token(&self) -> TokenKind {
        match self {
            AddOp::Plus => TokenKind::Plus,
            AddOp::Minus => TokenKind::Minus,
            AddOp::Or => TokenKind::Or,
        }
    }
}

impl MulOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(MulOp::Times),
            TokenKind::Slash => Some(MulOp::Slash),
            TokenKind::Div => Some(MulOp::Div),
            TokenKind::Mod => Some(MulOp::Mod),
            TokenKind::And => Some(MulOp::And),
            _ => None,
        }
    }

    pub fn token(&self) -> TokenKind {
        match self {
            MulOp::Times => TokenKind::Star,
            MulOp::Slash => TokenKind::Slash,
            MulOp::Div => TokenKind::Div,
            MulOp::Mod => TokenKind::Mod,
            MulOp::And => TokenKind::And,
        }
    }
}

impl Sign {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Sign::Plus),
            TokenKind::Minus => Some(Sign::Minus),
            _ => None,
        }
    }

    pub fn token(&self) -> TokenKind {
        match self {
            Sign::Plus => TokenKind::Plus,
            Sign::Minus => TokenKind::Minus,
        }
    }
}

/// At most one relation; `a < b < c` is not an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Relational {
        op: RelOp,
        left: SimpleExpr,
        right: SimpleExpr,
    },
    Simple(SimpleExpr),
}

/// `[sign] term {addOp term}`, folded left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleExpr {
    pub sign: Option<Sign>,
    pub first: Term,
    pub rest: Vec<(AddOp, Term)>,
}

/// `factor {mulOp factor}`, folded left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(MulOp, Factor)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    IntLit(i64),
    Paren(Box<Expression>),
    Not(Box<Factor>),
    /// `args: None` is a plain reference, `Some(..)` a call (possibly `f()`).
    Ref {
        target: Qualident,
        args: Option<Vec<Expression>>,
    },
}

impl Expression {
    pub fn relational(op: RelOp, left: impl Into<SimpleExpr>, right: impl Into<SimpleExpr>) -> Self {
        Expression::Relational {
            op,
            left: left.into(),
            right: right.into(),
        }
    }
}

impl SimpleExpr {
    pub fn new(sign: Option<Sign>, first: impl Into<Term>) -> Self {
        Self {
            sign,
            first: first.into(),
            rest: Vec::new(),
        }
    }

    /// Append `op term` to the right of the chain.
    pub fn then(mut self, op: AddOp, term: impl Into<Term>) -> Self {
        self.rest.push((op, term.into()));
        self
    }
}

impl Term {
    pub fn new(first: Factor) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Append `op factor` to the right of the chain.
    pub fn then(mut self, op: MulOp, factor: Factor) -> Self {
        self.rest.push((op, factor));
        self
    }
}

impl Factor {
    pub fn int(value: i64) -> Self {
        Factor::IntLit(value)
    }

    pub fn var(dotted: &str) -> Self {
        Factor::Ref {
            target: Qualident::path(dotted),
            args: None,
        }
    }

    pub fn call(dotted: &str, args: Vec<Expression>) -> Self {
        Factor::Ref {
            target: Qualident::path(dotted),
            args: Some(args),
        }
    }

    pub fn not(operand: Factor) -> Self {
        Factor::Not(Box::new(operand))
    }

    pub fn paren(inner: impl Into<Expression>) -> Self {
        Factor::Paren(Box::new(inner.into()))
    }
}

impl From<Factor> for Term {
    fn from(factor: Factor) -> Self {
        Term::new(factor)
    }
}

impl From<Term> for SimpleExpr {
    fn from(term: Term) -> Self {
        SimpleExpr::new(None, term)
    }
}

impl From<Factor> for SimpleExpr {
    fn from(factor: Factor) -> Self {
        SimpleExpr::new(None, factor)
    }
}

impl From<SimpleExpr> for Expression {
    fn from(simple: SimpleExpr) -> Self {
        Expression::Simple(simple)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::Simple(term.into())
    }
}

impl From<Factor> for Expression {
    fn from(factor: Factor) -> Self {
        Expression::Simple(factor.into())
    }
}
