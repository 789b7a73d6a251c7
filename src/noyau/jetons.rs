// src/noyau/jetons.rs
//
// Tokenisation stricte.
// - Littéraux décimaux gardés en TEXTE (conversion au moment de l’évaluation :
//   une faute de syntaxe plus loin dans l’entrée doit passer avant une erreur de conversion).
// - Aucun espace accepté à l’intérieur de l’expression.

use super::erreur::{ErreurEval, ResultatEval};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Suite maximale de chiffres et de points (ex: "12", "0.5", ".5").
    Num(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
}

/// Jeton + position (octet) dans l’entrée, pour des messages d’erreur précis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - littéraux décimaux [0-9.]+ (la validité du littéral est vérifiée plus tard)
/// - opérateurs + - * /
/// - parenthèses ( )
pub fn tokenize(s: &str) -> ResultatEval<Vec<Jeton>> {
    let mut out = Vec::new();
    let mut chars = s.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let tok = match c {
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,

            c if c.is_ascii_digit() || c == '.' => {
                let mut lexeme = String::from(c);
                while let Some(&(_, n)) = chars.peek() {
                    if !(n.is_ascii_digit() || n == '.') {
                        break;
                    }
                    lexeme.push(n);
                    chars.next();
                }
                Tok::Num(lexeme)
            }

            c => {
                return Err(ErreurEval::syntaxe(
                    format!("caractère inattendu: '{c}'"),
                    Some(pos),
                ))
            }
        };

        out.push(Jeton { tok, pos });
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| match &j.tok {
            Tok::Num(lexeme) => lexeme.as_str(),
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::LPar => "(",
            Tok::RPar => ")",
        })
        .collect::<Vec<_>>()
        .join(" ")
}
