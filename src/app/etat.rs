//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, profondeur, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la profondeur de parenthèses réglable.

use calculatrice_decimale::noyau::format::{format_etapes, format_substitutions};
use calculatrice_decimale::noyau::limites::{
    Limites, PROFONDEUR_MAX_ABSOLUE, PROFONDEUR_MAX_DEFAUT,
};
use calculatrice_decimale::noyau::Demarche as DemarcheNoyau;

/// Garde-fou : profondeur réglable au plus à cette valeur depuis l’UI (même plafond que le noyau).
pub const PROFONDEUR_MAX_UI: usize = PROFONDEUR_MAX_ABSOLUE;

/// Démarche déjà mise en texte pour l’affichage.
#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub forme: String,
    pub substitutions: String,
    pub etapes: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            jetons: d.jetons,
            forme: format!("{} (profondeur {})", d.forme, d.profondeur),
            substitutions: format_substitutions(&d.substitutions),
            etapes: format_etapes(&d.etapes),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // décimal exact
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub limites: Limites,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_limites(Limites::default())
    }
}

impl AppCalc {
    /// Démarrage avec des limites venues de la ligne de commande.
    pub fn avec_limites(limites: Limites) -> Self {
        let mut app = Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            limites,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        };
        app.set_profondeur_max(limites.profondeur_max);
        app
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + profondeur par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.limites.profondeur_max = PROFONDEUR_MAX_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère (l’entrée n’a pas de jeton multi-caractères à part les nombres).
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la démarche (non fiable si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : au moins 1 niveau, au plus PROFONDEUR_MAX_UI.
    pub fn set_profondeur_max(&mut self, profondeur: usize) {
        self.limites.profondeur_max = profondeur.clamp(1, PROFONDEUR_MAX_UI);
        self.focus_entree = true;
    }
}
