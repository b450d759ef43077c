//! JavaScript binary operator precedence

/// Precedence used when no parenthesization is required
pub const LOWEST_PREC: u8 = 0;

/// Precedence of prefix unary operators
pub const UNARY_PREC: u8 = 16;

/// Precedence of primary expressions (identifiers, literals, calls)
pub const HIGHEST_PREC: u8 = 21;

/// Binding strength of a binary operator.
///
/// Unknown operators bind at [`LOWEST_PREC`], which makes the printer
/// parenthesize them whenever they are nested.
pub fn precedence(op: &str) -> u8 {
    match op {
        "**" => 15,
        "*" | "/" | "%" => 14,
        "+" | "-" => 13,
        "<<" | ">>" | ">>>" => 12,
        "<" | "<=" | ">" | ">=" | "instanceof" | "in" => 11,
        "==" | "!=" | "===" | "!==" => 10,
        "&" => 9,
        "^" => 8,
        "|" => 7,
        "&&" => 6,
        "||" => 5,
        _ => LOWEST_PREC,
    }
}
