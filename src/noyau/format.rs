// src/noyau/format.rs
//
// Affichage texte de la démarche (terminal + panneau UI).

use rust_decimal::Decimal;

use super::eval::Demarche;
use super::substitutions::marqueur;

/// Registre en texte : "#0 = 7, #1 = -3".
pub fn format_substitutions(valeurs: &[Decimal]) -> String {
    if valeurs.is_empty() {
        return "(aucune)".to_string();
    }

    valeurs
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} = {v}", marqueur(i)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Étapes, une par ligne.
pub fn format_etapes(etapes: &[String]) -> String {
    etapes.join("\n")
}

/// Démarche complète, prête à imprimer.
pub fn format_demarche(d: &Demarche) -> String {
    let mut out = String::new();
    out.push_str(&format!("Jetons        : {}\n", d.jetons));
    out.push_str(&format!("Forme         : {}\n", d.forme));
    out.push_str(&format!("Profondeur    : {}\n", d.profondeur));
    out.push_str(&format!(
        "Substitutions : {}\n",
        format_substitutions(&d.substitutions)
    ));
    out.push_str("Étapes        :\n");
    for e in &d.etapes {
        out.push_str("  ");
        out.push_str(e);
        out.push('\n');
    }
    out
}
