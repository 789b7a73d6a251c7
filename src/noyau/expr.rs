// src/noyau/expr.rs
//
// Arbre explicite (remplace la réécriture textuelle à marqueurs).
// - Chaine   : un niveau de parenthèses, “aplati” : [-] opérande (op opérande)*
// - Operande : littéral décimal (texte) ou groupe parenthésé (Chaine imbriquée)
//
// Invariant (construction) : operateurs.len() == operandes.len() - 1, operandes non vide.

use std::fmt;

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

use super::erreur::{ErreurEval, ResultatEval};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// `*` et `/` passent avant `+` et `-`.
    pub fn est_multiplicatif(self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }

    /// Applique l’opérateur (arithmétique vérifiée, jamais d’infini silencieux).
    pub fn applique<T>(self, a: &T, b: &T) -> ResultatEval<T>
    where
        T: CheckedAdd + CheckedSub + CheckedMul + CheckedDiv + Zero + fmt::Display,
    {
        if self == Op::Div && b.is_zero() {
            return Err(ErreurEval::arithmetique(format!("division par zéro ({a} / {b})")));
        }

        let r = match self {
            Op::Add => a.checked_add(b),
            Op::Sub => a.checked_sub(b),
            Op::Mul => a.checked_mul(b),
            Op::Div => a.checked_div(b),
        };

        r.ok_or_else(|| {
            ErreurEval::arithmetique(format!(
                "dépassement de capacité ({a} {} {b})",
                self.symbole()
            ))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operande {
    /// Converti en décimal seulement à l’évaluation.
    Litteral { lexeme: String, pos: usize },
    Groupe(Box<Chaine>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chaine {
    /// Moins unaire accepté UNIQUEMENT en tête de chaîne (début d’entrée ou juste après '(').
    pub moins_en_tete: bool,
    pub operandes: Vec<Operande>,
    pub operateurs: Vec<Op>,
}

impl Chaine {
    /// Cas de base : un littéral seul (éventuellement précédé de '-').
    /// "-5" est un littéral, pas une réécriture.
    pub fn est_litteral_seul(&self) -> bool {
        self.operateurs.is_empty()
            && matches!(self.operandes.first(), Some(Operande::Litteral { .. }))
    }

    /// Profondeur d’imbrication (0 = aucune parenthèse).
    pub fn profondeur(&self) -> usize {
        self.operandes
            .iter()
            .map(|o| match o {
                Operande::Litteral { .. } => 0,
                Operande::Groupe(g) => 1 + g.profondeur(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Operande {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operande::Litteral { lexeme, .. } => f.write_str(lexeme),
            Operande::Groupe(g) => write!(f, "({g})"),
        }
    }
}

/// Forme compacte, sans espaces : re-tokenisable telle quelle.
impl fmt::Display for Chaine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.moins_en_tete {
            f.write_str("-")?;
        }
        for (i, o) in self.operandes.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.operateurs[i - 1].symbole())?;
            }
            write!(f, "{o}")?;
        }
        Ok(())
    }
}
