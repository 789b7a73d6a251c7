//! Noyau décimal exact
//!
//! Organisation interne :
//! - erreur.rs        : ErreurEval (syntaxe / arithmétique / garde-fous)
//! - jetons.rs        : tokenisation stricte (littéraux gardés en texte)
//! - analyse.rs       : équilibre des parenthèses + descente récursive -> Chaine
//! - expr.rs          : arbre (Chaine / Operande / Op) + arithmétique vérifiée
//! - substitutions.rs : registre des groupes réduits (#0, #1, ...)
//! - limites.rs       : garde-fous (profondeur, longueur)
//! - format.rs        : démarche en texte
//! - eval.rs          : pipeline complet

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod limites;
pub mod substitutions;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurEval, ResultatEval};
pub use eval::{eval_avec_limites, eval_detaille, eval_expression, Demarche};
pub use format::format_demarche;
pub use limites::Limites;
