//! Token definitions for wenyan.

use crate::error::LexErrorKind;
use crate::numeral;
use logos::Logos;
use smol_str::SmolStr;
use std::fmt;
use wenyan_diagnostics::SourceLocation;

/// A token with its kind, byte span and line/column location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
    pub loc: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>, loc: SourceLocation) -> Self {
        Self { kind, span, loc }
    }

    /// Whether this token is the given keyword.
    pub fn is(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Token kinds for wenyan.
///
/// Keyword phrases are plain `#[token]` patterns, so the generated automaton
/// always prefers the longest phrase.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\x{3000}]+")]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    // ========================================================================
    // Declarations
    // ========================================================================
    #[token("吾有", |_| Keyword::DeclarePrivate)]
    #[token("今有", |_| Keyword::DeclarePublic)]
    #[token("有", |_| Keyword::Have)]
    #[token("曰", |_| Keyword::Say)]
    #[token("名之", |_| Keyword::NameIt)]
    #[token("書之", |_| Keyword::Print)]
    #[token("噫", |_| Keyword::Discard)]
    #[token("批曰", |_| Keyword::Comment)]
    #[token("注曰", |_| Keyword::Comment)]
    #[token("疏曰", |_| Keyword::Comment)]
    #[token("昔之", |_| Keyword::Past)]
    #[token("今", |_| Keyword::Now)]
    #[token("是矣", |_| Keyword::ReassignEnd)]
    // ========================================================================
    // Control flow
    // ========================================================================
    #[token("若", |_| Keyword::If)]
    #[token("者", |_| Keyword::ConditionEnd)]
    #[token("或若", |_| Keyword::ElseIf)]
    #[token("若非", |_| Keyword::Else)]
    #[token("云云", |_| Keyword::BlockEnd)]
    #[token("也", |_| Keyword::BlockEnd)]
    #[token("恆為是", |_| Keyword::Loop)]
    #[token("為是", |_| Keyword::RangeLoop)]
    #[token("遍", |_| Keyword::Times)]
    #[token("凡", |_| Keyword::ForEach)]
    #[token("中之", |_| Keyword::ForEachIn)]
    #[token("乃止", |_| Keyword::Break)]
    #[token("乃止是遍", |_| Keyword::Continue)]
    #[token("乃得", |_| Keyword::Return)]
    #[token("乃得矣", |_| Keyword::ReturnAnswer)]
    #[token("乃歸空無", |_| Keyword::ReturnVoid)]
    // ========================================================================
    // Operations
    // ========================================================================
    #[token("施", |_| Keyword::Call)]
    #[token("於", |_| Keyword::At)]
    #[token("以", |_| Keyword::With)]
    #[token("加", |_| Keyword::Add)]
    #[token("減", |_| Keyword::Sub)]
    #[token("乘", |_| Keyword::Mul)]
    #[token("除", |_| Keyword::Div)]
    #[token("所餘幾何", |_| Keyword::Remainder)]
    #[token("餘", |_| Keyword::Mod)]
    #[token("變", |_| Keyword::Not)]
    #[token("夫", |_| Keyword::Express)]
    #[token("中有陽乎", |_| Keyword::AnyTrue)]
    #[token("中無陰乎", |_| Keyword::AllTrue)]
    #[token("等於", |_| Keyword::Eq)]
    #[token("不等於", |_| Keyword::Ne)]
    #[token("大於", |_| Keyword::Gt)]
    #[token("小於", |_| Keyword::Lt)]
    #[token("不大於", |_| Keyword::Le)]
    #[token("不小於", |_| Keyword::Ge)]
    #[token("且", |_| Keyword::And)]
    #[token("或", |_| Keyword::Or)]
    #[token("其", |_| Keyword::Answer)]
    #[token("其然", |_| Keyword::AnswerTrue)]
    #[token("其不然", |_| Keyword::AnswerFalse)]
    #[token("之長", |_| Keyword::Length)]
    #[token("之其餘", |_| Keyword::Rest)]
    #[token("之", |_| Keyword::Of)]
    #[token("充", |_| Keyword::Push)]
    #[token("銜", |_| Keyword::Concat)]
    // ========================================================================
    // Modules and macros
    // ========================================================================
    #[token("吾嘗觀", |_| Keyword::ImportFrom)]
    #[token("之書", |_| Keyword::ImportBook)]
    #[token("方悟", |_| Keyword::ImportNames)]
    #[token("之義", |_| Keyword::ImportEnd)]
    #[token("或云", |_| Keyword::MacroFrom)]
    #[token("蓋謂", |_| Keyword::MacroTo)]
    // ========================================================================
    // Functions and objects
    // ========================================================================
    #[token("欲行是術", |_| Keyword::FunctionArgs)]
    #[token("必先得", |_| Keyword::MustFirstGet)]
    #[token("乃行是術曰", |_| Keyword::FunctionBodyAfterArgs)]
    #[token("是術曰", |_| Keyword::FunctionBody)]
    #[token("是謂", |_| Keyword::ThisIs)]
    #[token("之術也", |_| Keyword::FunctionEnd)]
    #[token("其物如是", |_| Keyword::ObjectBody)]
    #[token("物之", |_| Keyword::ObjectKey)]
    #[token("之物也", |_| Keyword::ObjectEnd)]
    // ========================================================================
    // Errors
    // ========================================================================
    #[token("姑妄行此", |_| Keyword::Try)]
    #[token("如事不諧", |_| Keyword::Catch)]
    #[token("豈", |_| Keyword::CatchIs)]
    #[token("之禍歟", |_| Keyword::CatchIsEnd)]
    #[token("不知何禍歟", |_| Keyword::CatchAll)]
    #[token("乃作罷", |_| Keyword::TryEnd)]
    #[token("嗚呼", |_| Keyword::Throw)]
    #[token("之禍", |_| Keyword::Disaster)]
    Keyword(Keyword),

    #[token("數", |_| TypeName::Number)]
    #[token("言", |_| TypeName::String)]
    #[token("爻", |_| TypeName::Boolean)]
    #[token("列", |_| TypeName::Array)]
    #[token("物", |_| TypeName::Object)]
    #[token("術", |_| TypeName::Function)]
    #[token("元", |_| TypeName::Auto)]
    Type(TypeName),

    // ========================================================================
    // Literals
    // ========================================================================
    #[token("陰", |_| false)]
    #[token("陽", |_| true)]
    Bool(bool),

    #[regex("負?[零〇一二三四五六七八九兩十百千萬億兆]+", |lex| numeral::parse(lex.slice()))]
    Number(i64),

    /// `「「...」」` or `『...』`
    #[token("「「", double_quoted)]
    #[token("『", corner_quoted)]
    String(SmolStr),

    /// `「...」`
    #[token("「", single_quoted)]
    Identifier(SmolStr),

    // ========================================================================
    // Punctuation
    // ========================================================================
    #[token("。")]
    Period,
    #[token("、")]
    #[token("，")]
    Comma,

    /// End of file
    Eof,
}

/// Keyword phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    DeclarePrivate,
    DeclarePublic,
    Have,
    Say,
    NameIt,
    Print,
    Discard,
    Comment,
    Past,
    Now,
    ReassignEnd,
    If,
    ConditionEnd,
    ElseIf,
    Else,
    BlockEnd,
    Loop,
    RangeLoop,
    Times,
    ForEach,
    ForEachIn,
    Break,
    Continue,
    Return,
    ReturnAnswer,
    ReturnVoid,
    Call,
    At,
    With,
    Add,
    Sub,
    Mul,
    Div,
    Remainder,
    Mod,
    Not,
    Express,
    AnyTrue,
    AllTrue,
    Eq,
    Ne,
    Gt,
    Lt,
    Le,
    Ge,
    And,
    Or,
    Answer,
    AnswerTrue,
    AnswerFalse,
    Length,
    Rest,
    Of,
    Push,
    Concat,
    ImportFrom,
    ImportBook,
    ImportNames,
    ImportEnd,
    MacroFrom,
    MacroTo,
    FunctionArgs,
    MustFirstGet,
    FunctionBodyAfterArgs,
    FunctionBody,
    ThisIs,
    FunctionEnd,
    ObjectBody,
    ObjectKey,
    ObjectEnd,
    Try,
    Catch,
    CatchIs,
    CatchIsEnd,
    CatchAll,
    TryEnd,
    Throw,
    Disaster,
}

impl Keyword {
    /// The canonical phrase for this keyword.
    pub fn text(self) -> &'static str {
        match self {
            Keyword::DeclarePrivate => "吾有",
            Keyword::DeclarePublic => "今有",
            Keyword::Have => "有",
            Keyword::Say => "曰",
            Keyword::NameIt => "名之",
            Keyword::Print => "書之",
            Keyword::Discard => "噫",
            Keyword::Comment => "批曰",
            Keyword::Past => "昔之",
            Keyword::Now => "今",
            Keyword::ReassignEnd => "是矣",
            Keyword::If => "若",
            Keyword::ConditionEnd => "者",
            Keyword::ElseIf => "或若",
            Keyword::Else => "若非",
            Keyword::BlockEnd => "云云",
            Keyword::Loop => "恆為是",
            Keyword::RangeLoop => "為是",
            Keyword::Times => "遍",
            Keyword::ForEach => "凡",
            Keyword::ForEachIn => "中之",
            Keyword::Break => "乃止",
            Keyword::Continue => "乃止是遍",
            Keyword::Return => "乃得",
            Keyword::ReturnAnswer => "乃得矣",
            Keyword::ReturnVoid => "乃歸空無",
            Keyword::Call => "施",
            Keyword::At => "於",
            Keyword::With => "以",
            Keyword::Add => "加",
            Keyword::Sub => "減",
            Keyword::Mul => "乘",
            Keyword::Div => "除",
            Keyword::Remainder => "所餘幾何",
            Keyword::Mod => "餘",
            Keyword::Not => "變",
            Keyword::Express => "夫",
            Keyword::AnyTrue => "中有陽乎",
            Keyword::AllTrue => "中無陰乎",
            Keyword::Eq => "等於",
            Keyword::Ne => "不等於",
            Keyword::Gt => "大於",
            Keyword::Lt => "小於",
            Keyword::Le => "不大於",
            Keyword::Ge => "不小於",
            Keyword::And => "且",
            Keyword::Or => "或",
            Keyword::Answer => "其",
            Keyword::AnswerTrue => "其然",
            Keyword::AnswerFalse => "其不然",
            Keyword::Length => "之長",
            Keyword::Rest => "之其餘",
            Keyword::Of => "之",
            Keyword::Push => "充",
            Keyword::Concat => "銜",
            Keyword::ImportFrom => "吾嘗觀",
            Keyword::ImportBook => "之書",
            Keyword::ImportNames => "方悟",
            Keyword::ImportEnd => "之義",
            Keyword::MacroFrom => "或云",
            Keyword::MacroTo => "蓋謂",
            Keyword::FunctionArgs => "欲行是術",
            Keyword::MustFirstGet => "必先得",
            Keyword::FunctionBodyAfterArgs => "乃行是術曰",
            Keyword::FunctionBody => "是術曰",
            Keyword::ThisIs => "是謂",
            Keyword::FunctionEnd => "之術也",
            Keyword::ObjectBody => "其物如是",
            Keyword::ObjectKey => "物之",
            Keyword::ObjectEnd => "之物也",
            Keyword::Try => "姑妄行此",
            Keyword::Catch => "如事不諧",
            Keyword::CatchIs => "豈",
            Keyword::CatchIsEnd => "之禍歟",
            Keyword::CatchAll => "不知何禍歟",
            Keyword::TryEnd => "乃作罷",
            Keyword::Throw => "嗚呼",
            Keyword::Disaster => "之禍",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Type words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Number,
    String,
    Boolean,
    Array,
    Object,
    Function,
    Auto,
}

impl TypeName {
    pub fn text(self) -> &'static str {
        match self {
            TypeName::Number => "數",
            TypeName::String => "言",
            TypeName::Boolean => "爻",
            TypeName::Array => "列",
            TypeName::Object => "物",
            TypeName::Function => "術",
            TypeName::Auto => "元",
        }
    }
}

/// The coarse token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    QuotedLiteral,
    QuotedIdentifier,
    Numeral,
    Separator,
    EndMarker,
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Keyword => "keyword",
            TokenClass::QuotedLiteral => "literal",
            TokenClass::QuotedIdentifier => "identifier",
            TokenClass::Numeral => "numeral",
            TokenClass::Separator => "separator",
            TokenClass::EndMarker => "end",
        };
        f.write_str(name)
    }
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Keyword(_) | TokenKind::Type(_) | TokenKind::Bool(_) => TokenClass::Keyword,
            TokenKind::String(_) => TokenClass::QuotedLiteral,
            TokenKind::Identifier(_) => TokenClass::QuotedIdentifier,
            TokenKind::Number(_) => TokenClass::Numeral,
            TokenKind::Comma => TokenClass::Separator,
            TokenKind::Period | TokenKind::Eof => TokenClass::EndMarker,
        }
    }

    /// Check if this token ends a statement.
    pub fn is_end_marker(&self) -> bool {
        matches!(self, TokenKind::Period | TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(keyword) => f.write_str(keyword.text()),
            TokenKind::Type(ty) => f.write_str(ty.text()),
            TokenKind::Bool(true) => f.write_str("陽"),
            TokenKind::Bool(false) => f.write_str("陰"),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::String(s) => write!(f, "「「{s}」」"),
            TokenKind::Identifier(s) => write!(f, "「{s}」"),
            TokenKind::Period => f.write_str("。"),
            TokenKind::Comma => f.write_str("、"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

// ============================================================================
// Quoted spans
// ============================================================================

const OPEN: char = '「';
const CLOSE: char = '」';

/// Scan the body of a `「「...」」` literal. Nested `「」` pairs are content.
fn double_quoted(lex: &mut logos::Lexer<TokenKind>) -> Result<SmolStr, LexErrorKind> {
    let rest = lex.remainder();
    let mut depth = 0usize;
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            OPEN => depth += 1,
            CLOSE if depth > 0 => depth -= 1,
            CLOSE => {
                if let Some(&(_, CLOSE)) = chars.peek() {
                    lex.bump(i + 2 * CLOSE.len_utf8());
                    return Ok(SmolStr::from(&rest[..i]));
                }
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

fn corner_quoted(lex: &mut logos::Lexer<TokenKind>) -> Result<SmolStr, LexErrorKind> {
    let rest = lex.remainder();
    match rest.find('』') {
        Some(end) => {
            lex.bump(end + '』'.len_utf8());
            Ok(SmolStr::from(&rest[..end]))
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedString)
        }
    }
}

fn single_quoted(lex: &mut logos::Lexer<TokenKind>) -> Result<SmolStr, LexErrorKind> {
    let rest = lex.remainder();
    match rest.find(CLOSE) {
        Some(end) => {
            lex.bump(end + CLOSE.len_utf8());
            Ok(SmolStr::from(&rest[..end]))
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedIdentifier)
        }
    }
}
