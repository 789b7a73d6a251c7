//! Calculatrice décimale — bibliothèque
//!
//! Évaluateur d’expressions arithmétiques en décimal exact (`rust_decimal`) :
//! littéraux décimaux, `+ - * /`, parenthèses imbriquées, moins unaire en tête.
//!
//! ```
//! use calculatrice_decimale::noyau::eval_expression;
//! use rust_decimal::Decimal;
//!
//! assert_eq!(eval_expression("(3+4)*2").unwrap(), Decimal::from(14));
//! assert!(eval_expression("(1+2").unwrap_err().est_syntaxe());
//! ```

pub mod noyau;

pub use noyau::{eval_expression, ErreurEval};
