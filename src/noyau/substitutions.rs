// src/noyau/substitutions.rs
//
// Registre des substitutions d’UNE évaluation.
// - ajout seulement (indices stables, jamais réutilisés)
// - chaque groupe réduit (et chaque moins de tête) y reçoit un indice
// - le marqueur "#i" représente la valeur d’indice i dans la démarche

use rust_decimal::Decimal;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitutions {
    valeurs: Vec<Decimal>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une valeur et renvoie son indice.
    pub fn ajoute(&mut self, v: Decimal) -> usize {
        self.valeurs.push(v);
        self.valeurs.len() - 1
    }

    pub fn get(&self, indice: usize) -> Option<Decimal> {
        self.valeurs.get(indice).copied()
    }

    pub fn len(&self) -> usize {
        self.valeurs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valeurs.is_empty()
    }

    pub fn valeurs(&self) -> &[Decimal] {
        &self.valeurs
    }

    pub fn into_vec(self) -> Vec<Decimal> {
        self.valeurs
    }
}

/// Marqueur textuel d’une substitution.
pub fn marqueur(indice: usize) -> String {
    format!("#{indice}")
}
