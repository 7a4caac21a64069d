//! AST node definitions for wenyan.

use crate::Located;
use smol_str::SmolStr;
use wenyan_diagnostics::SourceLocation;

/// A complete wenyan program.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<Statement>,
}

/// The coarse value kind attached to declarations and literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VarType {
    Number,
    String,
    Array,
    Object,
    Boolean,
    Function,
    Auto,
}

/// Whether a declaration escapes its enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Accessability {
    Public,
    #[default]
    Private,
}

// ============================================================================
// Leaves
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralValue {
    Number(f64),
    String(SmolStr),
    Boolean(bool),
    /// Only produced as a declaration default.
    EmptyArray,
    /// Only produced as a declaration default.
    EmptyObject,
}

/// A literal value: `三`, `「「書」」`, `陽`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub var_type: VarType,
    pub value: LiteralValue,
    pub loc: Option<SourceLocation>,
}

impl Literal {
    pub fn number(value: f64) -> Self {
        Self::new(VarType::Number, LiteralValue::Number(value))
    }

    pub fn string(value: impl Into<SmolStr>) -> Self {
        Self::new(VarType::String, LiteralValue::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(VarType::Boolean, LiteralValue::Boolean(value))
    }

    fn new(var_type: VarType, value: LiteralValue) -> Self {
        Self {
            var_type,
            value,
            loc: None,
        }
    }

    /// The value a declaration of `var_type` takes when no value is given.
    pub fn default_for(var_type: VarType) -> Option<Self> {
        let value = match var_type {
            VarType::Number | VarType::Auto => LiteralValue::Number(0.0),
            VarType::String => LiteralValue::String(SmolStr::default()),
            VarType::Boolean => LiteralValue::Boolean(false),
            VarType::Array => LiteralValue::EmptyArray,
            VarType::Object => LiteralValue::EmptyObject,
            VarType::Function => return None,
        };
        Some(Self::new(var_type, value))
    }

    /// The value kind the literal itself has, ignoring its declared tag.
    pub fn natural_type(&self) -> VarType {
        match self.value {
            LiteralValue::Number(_) => VarType::Number,
            LiteralValue::String(_) => VarType::String,
            LiteralValue::Boolean(_) => VarType::Boolean,
            LiteralValue::EmptyArray => VarType::Array,
            LiteralValue::EmptyObject => VarType::Object,
        }
    }

    pub fn with_loc(mut self, loc: Option<SourceLocation>) -> Self {
        self.loc = loc;
        self
    }
}

/// A quoted name: `「甲」`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub name: SmolStr,
    /// Set when the identifier introduces a binding.
    #[cfg_attr(feature = "serde", serde(default))]
    pub declare: bool,
    pub loc: Option<SourceLocation>,
}

impl Identifier {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            declare: false,
            loc: None,
        }
    }

    pub fn declaring(mut self) -> Self {
        self.declare = true;
        self
    }

    pub fn with_loc(mut self, loc: Option<SourceLocation>) -> Self {
        self.loc = loc;
        self
    }
}

/// A reference to the answer register. Offset 0 is the latest result.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Answer {
    pub offset: usize,
    pub loc: Option<SourceLocation>,
}

impl Answer {
    pub fn new(offset: usize) -> Self {
        Self { offset, loc: None }
    }

    pub fn with_loc(mut self, loc: Option<SourceLocation>) -> Self {
        self.loc = loc;
        self
    }
}

/// A leaf that can appear as a declaration value, call argument or array base.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    Literal(Literal),
    Identifier(Identifier),
    Answer(Answer),
}

impl Operand {
    pub fn loc(&self) -> Option<SourceLocation> {
        match self {
            Operand::Literal(lit) => lit.loc,
            Operand::Identifier(ident) => ident.loc,
            Operand::Answer(answer) => answer.loc,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Literal(Literal),
    Identifier(Identifier),
    Answer(Answer),
    /// `變A`
    Unary(UnaryOperation),
    /// `A加B`, `A等於B`, `A且B`
    Binary(BinaryOperation),
    /// `A之長`, `A之其餘`, `A之B`
    Array(ArrayOperation),
}

impl From<Operand> for Expression {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Literal(lit) => Expression::Literal(lit),
            Operand::Identifier(ident) => Expression::Identifier(ident),
            Operand::Answer(answer) => Expression::Answer(answer),
        }
    }
}

impl Expression {
    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn not(expression: Expression) -> Self {
        Expression::Unary(UnaryOperation {
            operator: UnaryOperator::Not,
            expression: Box::new(expression),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    Not,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    // Logical
    And, // 且
    Or,  // 或
    // Comparison
    Eq, // 等於
    Ne, // 不等於
    Lt, // 小於
    Gt, // 大於
    Le, // 不大於
    Ge, // 不小於
    // Arithmetic
    Add, // 加
    Sub, // 減
    Mul, // 乘
    Div, // 除
    Mod, // 餘
}

impl BinaryOperator {
    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::And | BinaryOperator::Or => 1,
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Lt
            | BinaryOperator::Gt
            | BinaryOperator::Le
            | BinaryOperator::Ge => 2,
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Mod => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayOperation {
    pub base: Operand,
    pub operator: ArrayOperator,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrayOperator {
    Length,
    Rest,
    /// 1-based for numbers, a key for strings.
    Item(Operand),
}

// ============================================================================
// Statements
// ============================================================================

/// A statement.
pub type Statement = Located<StatementKind>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatementKind {
    /// `吾有三數。曰一。曰三。曰五。名之曰「甲」曰「乙」曰「丙」。`
    VariableDeclaration(VariableDeclaration),
    /// `吾有一術。名之曰「f」。欲行是術。...是謂「f」之術也。`
    FunctionDeclaration(FunctionDeclaration),
    /// `吾有一物。名之曰「o」。其物如是。...是謂「o」之物也。`
    ObjectDeclaration(ObjectDeclaration),
    If(IfStatement),
    While(WhileStatement),
    ForIn(ForInStatement),
    ForRange(ForRangeStatement),
    Try(TryStatement),
    /// `加一以二。`, `夫「甲」「乙」中有陽乎。`
    Operation(OperationStatement),
    /// `夫「甲」。`
    Express(ExpressStatement),
    /// `施「f」於一。`
    FunctionCall(FunctionCall),
    /// `銜「甲」以「乙」。`
    ArrayConcat(ArrayConcat),
    /// `充「甲」以一。`
    ArrayPush(ArrayPush),
    /// `昔之「甲」者。今三是矣。`
    Reassign(ReassignStatement),
    /// `書之。`
    Print(Print),
    /// `批曰。「「...」」。`
    Comment(Comment),
    /// `吾嘗觀「「m」」之書。方悟「a」之義。`
    Import(ImportStatement),
    /// `或云「「from」」。蓋謂「「to」」。`
    Macro(MacroStatement),
    Return(Return),
    Break,
    Continue,
    /// `嗚呼。「「E」」之禍。`
    Throw(Throw),
    /// `噫。`
    Discard,
}

impl StatementKind {
    /// The assignment target of statements that produce a value.
    pub fn assign_mut(&mut self) -> Option<&mut Option<Identifier>> {
        match self {
            StatementKind::Operation(s) => Some(&mut s.assign),
            StatementKind::Express(s) => Some(&mut s.assign),
            StatementKind::FunctionCall(s) => Some(&mut s.assign),
            StatementKind::ArrayConcat(s) => Some(&mut s.assign),
            StatementKind::ObjectDeclaration(s) => Some(&mut s.assign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDeclaration {
    pub var_type: VarType,
    pub count: usize,
    pub names: Vec<Identifier>,
    pub values: Vec<Operand>,
    pub accessability: Accessability,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionName {
    Identifier(Identifier),
    /// The function becomes the next answer.
    Answer(Answer),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionArgument {
    pub name: Identifier,
    pub var_type: VarType,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDeclaration {
    pub name: FunctionName,
    pub args: Vec<FunctionArgument>,
    pub body: Vec<Statement>,
    pub accessability: Accessability,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectEntry {
    pub key: SmolStr,
    pub var_type: VarType,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDeclaration {
    pub entries: Vec<ObjectEntry>,
    pub assign: Option<Identifier>,
}

/// An if statement. A missing condition marks the final else branch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfStatement {
    pub condition: Option<Expression>,
    pub body: Vec<Statement>,
    pub else_: Option<Box<IfStatement>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForInStatement {
    pub collection: Identifier,
    pub iterator: Option<Identifier>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopCount {
    Count(f64),
    Identifier(Identifier),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForRangeStatement {
    pub range: LoopCount,
    pub iterator: Option<Identifier>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TryStatement {
    pub body: Vec<Statement>,
    pub catches: Vec<CatchStatement>,
}

/// A catch clause. A missing error type catches everything.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatchStatement {
    pub error_type: Option<SmolStr>,
    pub binding: Option<Identifier>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationStatement {
    pub expression: Expression,
    pub assign: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressStatement {
    pub expression: Expression,
    pub assign: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    pub function: Identifier,
    pub args: Vec<Operand>,
    pub assign: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayConcat {
    pub target: Operand,
    pub values: Vec<Operand>,
    pub assign: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayPush {
    pub target: Operand,
    pub values: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReassignStatement {
    /// An identifier or an item access.
    pub assign: Expression,
    pub value: Expression,
}

/// `書之`. `None` prints every pending answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Print {
    pub expressions: Option<Vec<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub value: SmolStr,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportStatement {
    pub name: SmolStr,
    pub imports: Vec<SmolStr>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroStatement {
    pub from: SmolStr,
    pub to: SmolStr,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Return {
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throw {
    pub error_type: SmolStr,
    pub message: Option<Operand>,
}
