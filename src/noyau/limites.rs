// src/noyau/limites.rs
//
// Garde-fous (anti-abus / anti-pile).
// Vérifiés AVANT toute évaluation : longueur de l’entrée, puis profondeur des parenthèses.

/// Profondeur d’imbrication par défaut.
pub const PROFONDEUR_MAX_DEFAUT: usize = 256;

/// Plafond absolu de profondeur (pile) : aucune configuration ne le dépasse.
pub const PROFONDEUR_MAX_ABSOLUE: usize = 1024;

/// Longueur d’entrée par défaut (octets).
pub const LONGUEUR_MAX_DEFAUT: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub profondeur_max: usize,
    pub longueur_max: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            profondeur_max: PROFONDEUR_MAX_DEFAUT,
            longueur_max: LONGUEUR_MAX_DEFAUT,
        }
    }
}

impl Limites {
    /// Bornée à `PROFONDEUR_MAX_ABSOLUE`.
    pub fn avec_profondeur_max(mut self, profondeur_max: usize) -> Self {
        self.profondeur_max = profondeur_max.min(PROFONDEUR_MAX_ABSOLUE);
        self
    }

    /// Profondeur réellement appliquée (le champ est public : on re-borne ici).
    pub fn profondeur_effective(&self) -> usize {
        self.profondeur_max.min(PROFONDEUR_MAX_ABSOLUE)
    }

    pub fn avec_longueur_max(mut self, longueur_max: usize) -> Self {
        self.longueur_max = longueur_max;
        self
    }
}
