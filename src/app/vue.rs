// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// Note :
// - Aucun espace inséré par les boutons : le noyau refuse les espaces internes.
// - Seuls les espaces en début/fin d’entrée sont rognés avant l’évaluation.

use eframe::egui;
use log::warn;

use calculatrice_decimale::noyau::eval_detaille;

use super::etat::{AppCalc, PROFONDEUR_MAX_UI};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice décimale");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (3+4)*2, -5+3, 0.1+0.2")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Actions + profondeur
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Profondeur max :");
            let mut p = self.limites.profondeur_max as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut p)
                    .speed(1)
                    .range(1..=PROFONDEUR_MAX_UI as u32)
                    .suffix(" niveaux"),
            );
            if resp.changed() {
                self.set_profondeur_max(p as usize);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + parenthèses + "="
        ui.horizontal_wrapped(|ui| {
            for s in ["(", ")", "+", "-", "*", "/"] {
                self.bouton_insert(ui, s);
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_decimal")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for s in ["7", "8", "9"] {
                    self.bouton_insert(ui, s);
                }
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                for s in ["4", "5", "6", "/"] {
                    self.bouton_insert(ui, s);
                }
                ui.end_row();

                for s in ["1", "2", "3", "*"] {
                    self.bouton_insert(ui, s);
                }
                ui.end_row();

                self.bouton_insert(ui, "0");
                self.bouton_insert(ui, ".");
                self.bouton_insert(ui, "-");
                self.bouton_insert(ui, "+");
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat.is_empty() {
            ui.monospace("—");
        } else {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Forme", "demarche_forme", &self.demarche.forme);
                Self::champ_demarche(
                    ui,
                    "Substitutions",
                    "demarche_substitutions",
                    &self.demarche.substitutions,
                );
                Self::champ_demarche(ui, "Étapes", "demarche_etapes", &self.demarche.etapes);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, symbole: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(symbole));
        if resp.clicked() {
            self.entree.push_str(symbole);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat + démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match eval_detaille(s, &self.limites) {
            Ok((valeur, d)) => self.set_resultat(valeur.to_string(), d.into()),
            Err(e) => {
                warn!("évaluation refusée pour {s:?}: {e}");
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}
