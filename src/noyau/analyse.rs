// src/noyau/analyse.rs
//
// Jetons -> arbre de Chaine (descente récursive).
//
// Deux passes:
// 1) équilibre des parenthèses + profondeur (itératif, AVANT toute récursion)
//    => la descente récursive est bornée par Limites::profondeur_max
// 2) descente: chaine := ['-'] operande (op operande)* ; operande := NUM | '(' chaine ')'
//
// Règles reprises telles quelles:
// - moins unaire seulement en tête de chaîne ("5*-3", "--5" : refusés)
// - pas de plus unaire ("+5" : refusé)
// - opérande vide ou collée ("1+", "()", "5(3)") : refusée

use super::erreur::{ErreurEval, ResultatEval};
use super::expr::{Chaine, Op, Operande};
use super::jetons::{Jeton, Tok};

/// Construit l’arbre. `fin` = longueur de l’entrée (position des erreurs “fin d’entrée”).
pub fn analyse(jetons: &[Jeton], profondeur_max: usize, fin: usize) -> ResultatEval<Chaine> {
    verifie_parentheses(jetons, profondeur_max)?;

    let mut a = Analyseur { jetons, i: 0, fin };
    let chaine = a.chaine()?;

    // Après équilibre vérifié, seule une ')' orpheline peut rester ici.
    if let Some(j) = a.courant() {
        return Err(ErreurEval::syntaxe("parentheses mismatch", Some(j.pos)));
    }

    Ok(chaine)
}

/// Passe 1 : équilibre + profondeur (aucune récursion).
fn verifie_parentheses(jetons: &[Jeton], profondeur_max: usize) -> ResultatEval<()> {
    // Positions des '(' encore ouvertes (la plus ancienne non fermée = erreur à signaler).
    let mut ouvertes: Vec<usize> = Vec::new();

    for j in jetons {
        match j.tok {
            Tok::LPar => {
                if ouvertes.len() >= profondeur_max {
                    return Err(ErreurEval::ProfondeurDepassee {
                        limite: profondeur_max,
                    });
                }
                ouvertes.push(j.pos);
            }
            Tok::RPar => {
                if ouvertes.pop().is_none() {
                    return Err(ErreurEval::syntaxe("parentheses mismatch", Some(j.pos)));
                }
            }
            _ => {}
        }
    }

    match ouvertes.first() {
        Some(&pos) => Err(ErreurEval::syntaxe("parentheses mismatch", Some(pos))),
        None => Ok(()),
    }
}

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    fin: usize,
}

impl<'a> Analyseur<'a> {
    fn courant(&self) -> Option<&'a Jeton> {
        self.jetons.get(self.i)
    }

    fn position(&self) -> usize {
        self.courant().map_or(self.fin, |j| j.pos)
    }

    fn chaine(&mut self) -> ResultatEval<Chaine> {
        let moins_en_tete = matches!(self.courant(), Some(Jeton { tok: Tok::Minus, .. }));
        if moins_en_tete {
            self.i += 1;
        }

        let mut operandes = vec![self.operande()?];
        let mut operateurs = Vec::new();

        loop {
            let Some(j) = self.courant() else { break };

            let op = match j.tok {
                Tok::Plus => Op::Add,
                Tok::Minus => Op::Sub,
                Tok::Star => Op::Mul,
                Tok::Slash => Op::Div,
                // fin de groupe : c’est l’appelant qui consomme ')'
                Tok::RPar => break,
                // deux opérandes collées : "5(3)", "(1)2"
                Tok::Num(_) | Tok::LPar => return Err(ErreurEval::maths_invalides(Some(j.pos))),
            };

            self.i += 1;
            operateurs.push(op);
            operandes.push(self.operande()?);
        }

        Ok(Chaine {
            moins_en_tete,
            operandes,
            operateurs,
        })
    }

    fn operande(&mut self) -> ResultatEval<Operande> {
        let Some(j) = self.courant() else {
            // opérande vide en fin d’entrée : "1+", "-", ""
            return Err(ErreurEval::maths_invalides(Some(self.fin)));
        };

        match &j.tok {
            Tok::Num(lexeme) => {
                self.i += 1;
                Ok(Operande::Litteral {
                    lexeme: lexeme.clone(),
                    pos: j.pos,
                })
            }

            Tok::LPar => {
                self.i += 1;
                let interne = self.chaine()?;

                match self.courant() {
                    Some(Jeton { tok: Tok::RPar, .. }) => {
                        self.i += 1;
                        Ok(Operande::Groupe(Box::new(interne)))
                    }
                    _ => Err(ErreurEval::syntaxe(
                        "parentheses mismatch",
                        Some(self.position()),
                    )),
                }
            }

            // opérateur en trop ("5*-3", "+5", "1++2") ou groupe vide "()"
            _ => Err(ErreurEval::maths_invalides(Some(j.pos))),
        }
    }
}
