use std::fmt;

/// Location of a token in the filter source, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Attribute path
    ///
    /// Letters, digits and `-`, `_`, `.`, `:`, `/` are all accepted so that
    /// sub-attributes and schema URNs scan as a single identifier.
    ///
    /// # Examples
    /// ```text
    /// userName
    /// name.familyName
    /// urn:ietf:params:scim:schemas:core:2.0:User:userName
    /// ```
    Identifier(String),

    /// Double-quoted attribute value, escapes already resolved
    ///
    /// # Examples
    /// ```text
    /// "bjensen"
    /// "say \"hi\""
    /// ```
    String(String),

    /// Run of ASCII digits
    Integer(i64),

    /// `true` / `false`, any case
    Boolean(bool),

    /// `null`, any case
    Null,

    // Keyword operators, matched case-insensitively
    /// Negation of a parenthesized group
    Not,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Presence (`pr`)
    Pr,
    /// Equal (`eq`)
    Eq,
    /// Not equal (`ne`)
    Ne,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`ge`)
    Ge,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`le`)
    Le,
    /// Contains (`co`)
    Co,
    /// Starts with (`sw`)
    Sw,
    /// Ends with (`ew`)
    Ew,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket opening a value path filter
    LBracket,

    /// Right bracket
    RBracket,

    /// Dot introducing the sub-attribute after a value path (patch paths only)
    ///
    /// # Example
    /// ```text
    /// members[value eq "2819c223"].displayName
    /// ```
    Dot,

    /// End of input
    Eof,
}

impl Token {
    /// Short human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::String(s) => format!("string \"{}\"", s),
            Token::Integer(n) => format!("number {}", n),
            Token::Boolean(b) => format!("boolean {}", b),
            Token::Null => "null".to_string(),
            Token::Not => "'not'".to_string(),
            Token::And => "'and'".to_string(),
            Token::Or => "'or'".to_string(),
            Token::Pr => "'pr'".to_string(),
            Token::Eq => "'eq'".to_string(),
            Token::Ne => "'ne'".to_string(),
            Token::Gt => "'gt'".to_string(),
            Token::Ge => "'ge'".to_string(),
            Token::Lt => "'lt'".to_string(),
            Token::Le => "'le'".to_string(),
            Token::Co => "'co'".to_string(),
            Token::Sw => "'sw'".to_string(),
            Token::Ew => "'ew'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token together with where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}
