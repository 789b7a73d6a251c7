// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Deux familles “métier” (syntaxe / arithmétique) + deux garde-fous de ressources.

use thiserror::Error;

/// Résultat du noyau.
pub type ResultatEval<T> = Result<T, ErreurEval>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurEval {
    /// Parenthèses déséquilibrées, suite d’opérateurs invalide, caractère inconnu.
    #[error("Erreur de syntaxe: {raison}{}", format_position(.position))]
    Syntaxe {
        raison: String,
        /// Position (octet) dans l’entrée, si connue.
        position: Option<usize>,
    },

    /// Division par zéro, dépassement, littéral non convertible.
    #[error("Erreur arithmétique: {raison}")]
    Arithmetique { raison: String },

    #[error("Imbrication trop profonde (limite: {limite} niveaux)")]
    ProfondeurDepassee { limite: usize },

    #[error("Entrée trop longue ({longueur} octets, limite: {limite})")]
    EntreeTropLongue { longueur: usize, limite: usize },
}

fn format_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" (position {p})"),
        None => String::new(),
    }
}

impl ErreurEval {
    pub(crate) fn syntaxe(raison: impl Into<String>, position: Option<usize>) -> Self {
        ErreurEval::Syntaxe {
            raison: raison.into(),
            position,
        }
    }

    /// Raccourci : le message générique des suites d’opérateurs invalides.
    pub(crate) fn maths_invalides(position: Option<usize>) -> Self {
        Self::syntaxe("invalid maths", position)
    }

    pub(crate) fn arithmetique(raison: impl Into<String>) -> Self {
        ErreurEval::Arithmetique {
            raison: raison.into(),
        }
    }

    pub fn est_syntaxe(&self) -> bool {
        matches!(self, ErreurEval::Syntaxe { .. })
    }

    pub fn est_arithmetique(&self) -> bool {
        matches!(self, ErreurEval::Arithmetique { .. })
    }

    /// Garde-fous de ressources (profondeur / longueur).
    pub fn est_ressource(&self) -> bool {
        matches!(
            self,
            ErreurEval::ProfondeurDepassee { .. } | ErreurEval::EntreeTropLongue { .. }
        )
    }
}
