// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// Objectifs :
// - Même AppCarnet (etat.rs) pour natif + wasm
// - Clavier : Enter évalue la cellule (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique : In / Out par cellule, LaTeX copiable
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use formateur_qpur::affichage::Sortie;

use super::etat::AppCarnet;

impl AppCarnet {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Carnet Q-pur");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_cellules(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Cellule :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: pi/2, 1 - 0.25j, [[1, 0.5], [pi, 2]], arange(100)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.evaluer_entree();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = historique seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface l’historique + erreur", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.evaluer_entree();
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::Close);
            self.bouton_insert(ui, "[", "[", InsertKind::OpenParen);
            self.bouton_insert(ui, "]", "]", InsertKind::Close);
            self.bouton_insert(ui, ",", ", ", InsertKind::Close);

            ui.separator();

            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            self.bouton_insert(ui, "j", "j", InsertKind::Suffix);
            self.bouton_insert(ui, "sqrt", "sqrt(", InsertKind::Func);

            ui.separator();

            self.bouton_insert(ui, "arange", "arange(", InsertKind::Func);
            self.bouton_insert(ui, "zeros", "zeros((", InsertKind::Func);
            self.bouton_insert(ui, "eye", "eye(", InsertKind::Func);
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Décimal :");
            let mut k = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut k)
                    .speed(1)
                    .range(1..=17)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(k as usize);
            }

            ui.separator();

            ui.label("Fenêtre :");
            let (mut lignes, mut colonnes) = (self.lignes_max as u32, self.colonnes_max as u32);
            let rl = ui.add(egui::DragValue::new(&mut lignes).speed(1).range(1..=30));
            ui.label("×");
            let rc = ui.add(egui::DragValue::new(&mut colonnes).speed(1).range(1..=30));
            if rl.changed() || rc.changed() {
                self.set_fenetre(lignes as usize, colonnes as usize);
            }
        });
    }

    fn ui_cellules(&mut self, ui: &mut egui::Ui) {
        if self.carnet.cellules().is_empty() {
            ui.weak("(aucune cellule)");
            return;
        }

        // Plus récente en haut.
        for (i, cellule) in self.carnet.cellules().iter().enumerate().rev() {
            ui.push_id(("cellule", i), |ui| {
                ui.monospace(format!("In [{}]: {}", i + 1, cellule.entree));
                match &cellule.sortie {
                    Sortie::Latex(latex) => {
                        ui.horizontal(|ui| {
                            ui.label(format!("Out[{}]:", i + 1));
                            if ui.small_button("copier").clicked() {
                                ui.ctx().copy_text(latex.clone());
                            }
                        });
                        Self::champ_monospace(ui, "latex", latex, 1);
                    }
                    Sortie::Defaut(repr) => {
                        ui.label(format!("Out[{}]:", i + 1));
                        Self::champ_monospace(ui, "defaut", repr, 1);
                    }
                    Sortie::Erreur(msg) => {
                        ui.colored_label(ui.visuals().error_fg_color, msg);
                    }
                }
            });
            ui.add_space(4.0);
        }
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

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sqrt(", "pi", etc.).
    fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        for pat in ["arange(", "zeros((", "sqrt(", "eye(", "pi"] {
            if let Some(n) = self.entree.strip_suffix(pat).map(str::len) {
                self.entree.truncate(n);
                return;
            }
        }

        self.entree.pop();
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
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        let dernier = self.entree.chars().rev().find(|c| !c.is_whitespace());
        match kind {
            InsertKind::Close | InsertKind::Suffix => {
                // collé au symbole précédent (`2j`, `[1, 2]`)
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
            }
            InsertKind::OpenParen | InsertKind::Func | InsertKind::Word => {
                if let Some(c) = dernier {
                    if c.is_ascii_alphanumeric() || c == ')' || c == ']' {
                        self.entree.push_str(" * ");
                    }
                }
            }
        }
        self.entree.push_str(to_insert);

        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Word,
    Func,
    Suffix,
    OpenParen,
    Close,
}
