//! Error and warning codes for Escurieux diagnostics.

use std::fmt;
use std::str::FromStr;

/// Every code the front end can report, with its catalog explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer errors
    UnterminatedComment,
    EmptyHexLiteral,
    EmptyOctalLiteral,
    UnterminatedString,
    UnexpectedEof,
    InvalidEscape,
    EmptyBinaryLiteral,
    InvalidCharacter,
    EscapedNewlineInChar,
    UnterminatedChar,
    InvalidLabel,

    // Parser errors
    UnexpectedToken,
    LeadingOrDoubleComma,
    MissingComma,
    EmptyTypeParameters,
    MissingArgumentList,
    UntypedArgument,
    EmptyConstraintList,
    ClassComma,
    InvalidAssignmentTarget,
    UnclosedTemplateExpression,
    UnlabelableExpression,
    ListComma,
    ListSeparator,
    MapComma,
    MapSeparator,
    ExpectedPattern,
    ImportComma,
    ImportSeparator,
    EmptyImport,
    ListPatternComma,
    ListPatternSeparator,
    ObjectPatternComma,
    ObjectPatternSeparator,
    ClassNameNotIdentifier,
    TraitNameNotIdentifier,
    TraitComma,
    UnexpectedTraitMember,
    UntypedTraitProperty,
    MissingInitializer,
    InvalidModifierBlock,
    NestedModifier,
    DuplicateProperty,
    ExpectedOperator,
    TooManyOverloadArguments,
    BinaryOverloadArity,
    UnaryOverloadArity,
    EnumComma,
    UnexpectedClassMember,
    /// Reported as E00011, which it shares with `LeadingOrDoubleComma`.
    ExpectedExpression,
    InternalFailure,

    // Warnings
    LeadingZero,
    RedundantPrivate,
    UnnecessaryDollarEscape,
    PrivateTraitMember,
}

impl ErrorCode {
    /// One entry per catalog code. `ExpectedExpression` is looked up through
    /// `LeadingOrDoubleComma`.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::UnterminatedComment,
        ErrorCode::EmptyHexLiteral,
        ErrorCode::EmptyOctalLiteral,
        ErrorCode::UnterminatedString,
        ErrorCode::UnexpectedEof,
        ErrorCode::InvalidEscape,
        ErrorCode::EmptyBinaryLiteral,
        ErrorCode::InvalidCharacter,
        ErrorCode::EscapedNewlineInChar,
        ErrorCode::UnterminatedChar,
        ErrorCode::InvalidLabel,
        ErrorCode::UnexpectedToken,
        ErrorCode::LeadingOrDoubleComma,
        ErrorCode::MissingComma,
        ErrorCode::EmptyTypeParameters,
        ErrorCode::MissingArgumentList,
        ErrorCode::UntypedArgument,
        ErrorCode::EmptyConstraintList,
        ErrorCode::ClassComma,
        ErrorCode::InvalidAssignmentTarget,
        ErrorCode::UnclosedTemplateExpression,
        ErrorCode::UnlabelableExpression,
        ErrorCode::ListComma,
        ErrorCode::ListSeparator,
        ErrorCode::MapComma,
        ErrorCode::MapSeparator,
        ErrorCode::ExpectedPattern,
        ErrorCode::ImportComma,
        ErrorCode::ImportSeparator,
        ErrorCode::EmptyImport,
        ErrorCode::ListPatternComma,
        ErrorCode::ListPatternSeparator,
        ErrorCode::ObjectPatternComma,
        ErrorCode::ObjectPatternSeparator,
        ErrorCode::ClassNameNotIdentifier,
        ErrorCode::TraitNameNotIdentifier,
        ErrorCode::TraitComma,
        ErrorCode::UnexpectedTraitMember,
        ErrorCode::UntypedTraitProperty,
        ErrorCode::MissingInitializer,
        ErrorCode::InvalidModifierBlock,
        ErrorCode::NestedModifier,
        ErrorCode::DuplicateProperty,
        ErrorCode::ExpectedOperator,
        ErrorCode::TooManyOverloadArguments,
        ErrorCode::BinaryOverloadArity,
        ErrorCode::UnaryOverloadArity,
        ErrorCode::EnumComma,
        ErrorCode::UnexpectedClassMember,
        ErrorCode::InternalFailure,
        ErrorCode::LeadingZero,
        ErrorCode::RedundantPrivate,
        ErrorCode::UnnecessaryDollarEscape,
        ErrorCode::PrivateTraitMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnterminatedComment => "E00001",
            ErrorCode::EmptyHexLiteral => "E00002",
            ErrorCode::EmptyOctalLiteral => "E00003",
            ErrorCode::UnterminatedString => "E00004",
            ErrorCode::UnexpectedEof => "E00005",
            ErrorCode::InvalidEscape => "E00006",
            ErrorCode::EmptyBinaryLiteral => "E00007",
            ErrorCode::InvalidCharacter => "E00008",
            ErrorCode::EscapedNewlineInChar => "E00009",
            ErrorCode::UnterminatedChar => "E00013",
            ErrorCode::InvalidLabel => "E00021",

            // Parser
            ErrorCode::UnexpectedToken => "E00010",
            ErrorCode::LeadingOrDoubleComma => "E00011",
            ErrorCode::MissingComma => "E00012",
            ErrorCode::EmptyTypeParameters => "E00014",
            ErrorCode::MissingArgumentList => "E00015",
            ErrorCode::UntypedArgument => "E00016",
            ErrorCode::EmptyConstraintList => "E00017",
            ErrorCode::ClassComma => "E00018",
            ErrorCode::InvalidAssignmentTarget => "E00019",
            ErrorCode::UnclosedTemplateExpression => "E00020",
            ErrorCode::UnlabelableExpression => "E00022",
            ErrorCode::ListComma => "E00023",
            ErrorCode::ListSeparator => "E00024",
            ErrorCode::MapComma => "E00025",
            ErrorCode::MapSeparator => "E00026",
            ErrorCode::ExpectedPattern => "E00027",
            ErrorCode::ImportComma => "E00028",
            ErrorCode::ImportSeparator => "E00029",
            ErrorCode::EmptyImport => "E00030",
            ErrorCode::ListPatternComma => "E00031",
            ErrorCode::ListPatternSeparator => "E00032",
            ErrorCode::ObjectPatternComma => "E00033",
            ErrorCode::ObjectPatternSeparator => "E00034",
            ErrorCode::ClassNameNotIdentifier => "E00035",
            ErrorCode::TraitNameNotIdentifier => "E00036",
            ErrorCode::TraitComma => "E00037",
            ErrorCode::UnexpectedTraitMember => "E00038",
            ErrorCode::UntypedTraitProperty => "E00039",
            ErrorCode::MissingInitializer => "E00040",
            ErrorCode::InvalidModifierBlock => "E00041",
            ErrorCode::NestedModifier => "E00042",
            ErrorCode::DuplicateProperty => "E00043",
            ErrorCode::ExpectedOperator => "E00044",
            ErrorCode::TooManyOverloadArguments => "E00045",
            ErrorCode::BinaryOverloadArity => "E00046",
            ErrorCode::UnaryOverloadArity => "E00047",
            ErrorCode::EnumComma => "E00048",
            ErrorCode::UnexpectedClassMember => "E00049",
            ErrorCode::ExpectedExpression => "E00011",
            ErrorCode::InternalFailure => "E99999",

            // Warnings
            ErrorCode::LeadingZero => "W00001",
            ErrorCode::RedundantPrivate => "W00002",
            ErrorCode::UnnecessaryDollarEscape => "W00003",
            ErrorCode::PrivateTraitMember => "W00004",
        }
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    /// The bracketed tag that starts a rendered diagnostic, e.g. `[ESCE00004]`.
    pub fn tag(&self) -> String {
        format!("[ESC{}]", self.as_str())
    }

    /// Short title of the code, as listed in the catalog.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::UnterminatedComment => "Comments opened with /* must be closed before EOF",
            ErrorCode::EmptyHexLiteral => "Hexadecimal numbers must contain at least one digit",
            ErrorCode::EmptyOctalLiteral => "Octal numbers must contain at least one digit",
            ErrorCode::UnterminatedString => "Endless string",
            ErrorCode::UnexpectedEof => "Trying to access a character past EOF",
            ErrorCode::InvalidEscape => "Invalid escape sequence",
            ErrorCode::EmptyBinaryLiteral => "Binary numbers must contain at least one digit",
            ErrorCode::InvalidCharacter => "Invalid character",
            ErrorCode::EscapedNewlineInChar => "Cannot escape a newline in a character literal",
            ErrorCode::UnterminatedChar => "Character literals must be closed",
            ErrorCode::InvalidLabel => "Malformed label",
            ErrorCode::UnexpectedToken => "Expected TokenType.<token type>, got <text> : <explanation>",
            ErrorCode::LeadingOrDoubleComma => "Could not parse (misplaced comma or missing expression)",
            ErrorCode::MissingComma => "(Arguments | Indices) should be separated by commas",
            ErrorCode::EmptyTypeParameters => "Unexpected empty type parameters",
            ErrorCode::MissingArgumentList => "A left parenthesis is required to start a function's argument list",
            ErrorCode::UntypedArgument => "Function arguments must be typed",
            ErrorCode::EmptyConstraintList => "Parentheses in ':' type constraints must contain something",
            ErrorCode::ClassComma => "Leading or double commas are not allowed in classes",
            ErrorCode::InvalidAssignmentTarget => "Left expression of an assignment must be either an identifier, a property access or an indexing expression",
            ErrorCode::UnclosedTemplateExpression => "Expected '}' after expression in template string",
            ErrorCode::UnlabelableExpression => "Cannot label anything that is not a for loop, a 'loop' loop, or a block",
            ErrorCode::ListComma => "Leading / double commas are not allowed within list literals",
            ErrorCode::ListSeparator => "A list literal's elements should be separated by commas",
            ErrorCode::MapComma => "Leading / double commas are not allowed within map literals",
            ErrorCode::MapSeparator => "A map literal's key/value pairs should be separated by commas",
            ErrorCode::ExpectedPattern => "Could not parse (expected a pattern)",
            ErrorCode::ImportComma => "No leading / double commas are allowed within imports",
            ErrorCode::ImportSeparator => "Expected either '}' or an import section",
            ErrorCode::EmptyImport => "Cannot import nothing from a module",
            ErrorCode::ListPatternComma => "Leading / double commas are not allowed within list patterns",
            ErrorCode::ListPatternSeparator => "A list pattern's elements should be separated by commas",
            ErrorCode::ObjectPatternComma => "Leading / double commas are not allowed within object patterns",
            ErrorCode::ObjectPatternSeparator => "An object pattern's property patterns should be separated by commas",
            ErrorCode::ClassNameNotIdentifier => "Class names must be identifiers",
            ErrorCode::TraitNameNotIdentifier => "Trait names must be identifiers",
            ErrorCode::TraitComma => "Leading or double commas are not allowed in traits",
            ErrorCode::UnexpectedTraitMember => "Unexpected token in a trait body",
            ErrorCode::UntypedTraitProperty => "Trait properties must be explicitly typed",
            ErrorCode::MissingInitializer => "A const or type-inferred declaration must have a value",
            ErrorCode::InvalidModifierBlock => "Privacy / staticness blocks cannot be nested more than two levels deep and there may not be two of the same type",
            ErrorCode::NestedModifier => "Modifiers are not allowed within blocks of the same kind",
            ErrorCode::DuplicateProperty => "A property with the same name has already been defined",
            ErrorCode::ExpectedOperator => "An operator was expected",
            ErrorCode::TooManyOverloadArguments => "Operator overloading functions can only have no arguments or one argument",
            ErrorCode::BinaryOverloadArity => "Non-unary operator overloads must have exactly one argument",
            ErrorCode::UnaryOverloadArity => "Unary only operator overloads must have no arguments",
            ErrorCode::EnumComma => "Double / leading commas are not allowed in enums",
            ErrorCode::UnexpectedClassMember => "Unexpected token in a class body",
            ErrorCode::ExpectedExpression => "Could not parse (expected an expression)",
            ErrorCode::InternalFailure => "Internal parser failure",
            ErrorCode::LeadingZero => "Leading zero in number literal",
            ErrorCode::RedundantPrivate => "The 'private' access specifier is not required, properties and methods are private by default",
            ErrorCode::UnnecessaryDollarEscape => "Dollar signs '$' are not required to be escaped within template strings if they aren't followed by a '{'",
            ErrorCode::PrivateTraitMember => "Private members in traits are never visible to implementors",
        }
    }

    /// Long explanation printed by `--explain` and in verbose mode.
    pub fn explanation(&self) -> &'static str {
        match self {
            ErrorCode::UnterminatedComment => "This error happens when there are more block comment starts (/*) than there are block comment ends (*/) in a source file. Block comments nest, so /* /* */ (which would be valid in many programming languages) is not valid here.",
            ErrorCode::EmptyHexLiteral => "A hexadecimal number start '0x' must be followed by a dot or at least one hexadecimal digit (0-9, A / a to F / f).",
            ErrorCode::EmptyOctalLiteral => "An octal number start '0o' must be followed by a dot or at least one octal digit (0, 1, 2, 3, 4, 5, 6, 7).",
            ErrorCode::UnterminatedString => "A string has no terminating quote and thus runs to the end of the file. The diagnostic points at the quote that opened it.",
            ErrorCode::UnexpectedEof => "The tokenizer tried to read a character past the end of the file. This usually happens when a backslash is the last character of a file, or when a number prefix such as 0x ends the file.",
            ErrorCode::InvalidEscape => "A backslash in a string or character literal is not followed by a character that can be escaped. Valid escapes are: newline (strings only), 'n', '\\', ''', '\"' and '`'. Template strings additionally accept '$'.",
            ErrorCode::EmptyBinaryLiteral => "A binary number start '0b' must be followed by a dot or at least one binary digit (0, 1).",
            ErrorCode::InvalidCharacter => "An unrecognized character was read in the source code.",
            ErrorCode::EscapedNewlineInChar => "A newline is escaped within a character literal. Character literals hold exactly one character, so eliding a newline makes no sense there.",
            ErrorCode::UnterminatedChar => "A character literal holds exactly one (possibly escaped) character and must be closed by a single quote, e.g. 'a' or '\\n'.",
            ErrorCode::InvalidLabel => "A label started by '#' is required to contain at least one character except the '#', and the first of these characters is required to be an ASCII letter or underscore (/[A-Za-z_]/).",
            ErrorCode::UnexpectedToken => "The compiler expected a particular token (e.g. a closing parenthesis) but another token was found instead.",
            ErrorCode::LeadingOrDoubleComma => "A token was found where an expression or a list element had to start. Lists of function arguments, parameters, indices or type parameters accept commas between elements and an optional trailing comma, but no leading comma (e.g. Map[,string, int]) and no double comma (e.g. f(1,, 8)). Apart from those lists, the token simply cannot start an expression; only the 'map!' macro is currently recognized as one.",
            ErrorCode::MissingComma => "A function is called, declared or indexed with several arguments / indices that aren't separated with commas (e.g. func(1 2)). Arguments and indices must always be comma-separated.",
            ErrorCode::EmptyTypeParameters => "A type has empty type parameters (e.g. Map[]). Add the missing type parameters or remove the [] if the type takes none.",
            ErrorCode::MissingArgumentList => "Function expressions (fn funcName(arg1: int, arg2: int) int {}) are required to have an argument list enclosed in parentheses, even when it is empty.",
            ErrorCode::UntypedArgument => "Function arguments always need to be typed (e.g. fn funcName(argName: Type) {}). Only lambda arguments may leave their types out.",
            ErrorCode::EmptyConstraintList => "In type constraints that require several traits (e.g. class Cls[T: (A, B)] {...}), the parentheses must contain something. Remove them if no trait is required.",
            ErrorCode::ClassComma => "In classes (class Class { ... }), commas separate methods and properties and an optional trailing comma is allowed, but nothing else.",
            ErrorCode::InvalidAssignmentTarget => "Only identifiers (variable / constant names), property access expressions (e.g. obj.field) and indexing expressions (e.g. x[0]) can be assigned to. '1 + 1 = 2' is therefore invalid.",
            ErrorCode::UnclosedTemplateExpression => "In template strings (delimited by '`' characters), expressions inserted via ${expr} must be closed by a closing curly bracket '}' right after the expression.",
            ErrorCode::UnlabelableExpression => "Labels (#name: ...) can only be attached to 'for' loops, 'loop' loops and blocks, since those are the only constructs 'break' and 'continue' can target.",
            ErrorCode::ListComma => "List literals accept commas between elements and an optional trailing comma, but no leading or double comma (e.g. [1,, 2]).",
            ErrorCode::ListSeparator => "Elements of a list literal must be separated by commas (e.g. [1, 2] instead of [1 2]).",
            ErrorCode::MapComma => "Map literals (map!{key: value, ...}) accept commas between pairs and an optional trailing comma, but no leading or double comma.",
            ErrorCode::MapSeparator => "Key / value pairs of a map literal must be separated by commas.",
            ErrorCode::ExpectedPattern => "A pattern (a name, @name pattern, [list pattern] or {object pattern}) was expected, but the token found cannot start one.",
            ErrorCode::ImportComma => "Brace lists in imports (import a.{b, c}) accept commas between sections and an optional trailing comma, but no leading or double comma.",
            ErrorCode::ImportSeparator => "Inside an import brace list, each import section must be followed by either a comma or the closing '}'.",
            ErrorCode::EmptyImport => "An import brace list must name at least one item: 'import a.{}' imports nothing.",
            ErrorCode::ListPatternComma => "List patterns accept commas between sub-patterns and an optional trailing comma, but no leading or double comma.",
            ErrorCode::ListPatternSeparator => "Sub-patterns of a list pattern must be separated by commas.",
            ErrorCode::ObjectPatternComma => "Object patterns accept commas between fields and an optional trailing comma, but no leading or double comma.",
            ErrorCode::ObjectPatternSeparator => "Fields of an object pattern must be separated by commas.",
            ErrorCode::ClassNameNotIdentifier => "The name following 'class' or 'struct' must be a plain identifier; destructuring patterns cannot name a class.",
            ErrorCode::TraitNameNotIdentifier => "The name following 'trait' or 'structural trait' must be a plain identifier; destructuring patterns cannot name a trait.",
            ErrorCode::TraitComma => "In traits, commas separate methods and properties and an optional trailing comma is allowed, but nothing else.",
            ErrorCode::UnexpectedTraitMember => "A trait member must start with one of 'private', 'protected', 'public', 'const', 'static', 'fn', 'operator' or an identifier.",
            ErrorCode::UntypedTraitProperty => "Trait properties describe what implementors must provide, so their type must always be written out (e.g. name: string).",
            ErrorCode::MissingInitializer => "A 'const' declaration must always be given a value, and so must a 'let' declaration without a type annotation, since its type is inferred from that value.",
            ErrorCode::InvalidModifierBlock => "Privacy blocks (public { ... }, protected { ... }) and static blocks (static { ... }) can be nested at most two levels deep, and the same kind of block may not appear twice in one nesting chain.",
            ErrorCode::NestedModifier => "Inside a privacy block, members cannot carry their own privacy specifier; inside a static block, members cannot be marked 'static' again.",
            ErrorCode::DuplicateProperty => "Two properties of the same class or trait have the same name.",
            ErrorCode::ExpectedOperator => "'operator' must be followed by the operator being overloaded. Valid operators are ! * ** / + - | || & && ^ >> << < > >= <= == ~ ++ --.",
            ErrorCode::TooManyOverloadArguments => "An operator overload receives its left operand as the instance itself, so it can take at most one argument (the right operand).",
            ErrorCode::BinaryOverloadArity => "Binary-only operators (e.g. *, /, ==) need the right operand as their single argument.",
            ErrorCode::UnaryOverloadArity => "Unary-only operators (~ ++ -- !) operate on the instance alone and must take no arguments.",
            ErrorCode::EnumComma => "Enums accept commas between variants (and between a variant's types) and an optional trailing comma, but no leading or double comma.",
            ErrorCode::UnexpectedClassMember => "A class member must start with one of 'private', 'protected', 'public', 'const', 'static', 'fn', 'operator' or an identifier.",
            ErrorCode::ExpectedExpression => "The token found cannot start an expression. Only the 'map!' macro is currently recognized as an expression.",
            ErrorCode::InternalFailure => "An error happened inside the parser itself. Please report this to https://github.com/Astroide/escurieux/issues so that it can be fixed.",
            ErrorCode::LeadingZero => "A number literal starts with one or more extra zeroes, as in 0123, 0893.034 or 0023. If this was intended to be an octal literal, write 0o123 instead.",
            ErrorCode::RedundantPrivate => "Properties and methods of classes are private unless specified otherwise, so writing 'private' is redundant.",
            ErrorCode::UnnecessaryDollarEscape => "In template strings, escaping a dollar sign is only useful when it is followed by an opening curly bracket, so that '${' is not read as the start of an embedded expression.",
            ErrorCode::PrivateTraitMember => "Trait members are public by default and exist to be seen by implementors; nothing forbids a private member, but it is almost certainly a mistake.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when `--explain` is given a code that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no error or warning has the code '{0}'")]
pub struct UnknownCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    /// Accepts `E00004`, `e00004` and `ESCE00004`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        let upper = trimmed.to_ascii_uppercase();
        let code = upper.strip_prefix("ESC").unwrap_or(&upper);
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| UnknownCode(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ErrorCode::ALL {
            assert!(seen.insert(code.as_str()), "duplicate {}", code.as_str());
        }
    }

    #[test]
    fn test_parse_code_variants() {
        assert_eq!("E00004".parse(), Ok(ErrorCode::UnterminatedString));
        assert_eq!("w00001".parse(), Ok(ErrorCode::LeadingZero));
        assert_eq!("[ESCE00019]".parse(), Ok(ErrorCode::InvalidAssignmentTarget));
        assert!("E12345".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_expected_expression_shares_comma_code() {
        assert_eq!(ErrorCode::ExpectedExpression.tag(), "[ESCE00011]");
        assert_eq!("E00011".parse(), Ok(ErrorCode::LeadingOrDoubleComma));
        assert!(!ErrorCode::ALL.contains(&ErrorCode::ExpectedExpression));
    }

    #[test]
    fn test_warning_classification() {
        assert!(ErrorCode::RedundantPrivate.is_warning());
        assert!(!ErrorCode::InternalFailure.is_warning());
        assert_eq!(ErrorCode::LeadingZero.tag(), "[ESCW00001]");
    }
}
