//! Noyau — évaluation (pipeline réel)
//!
//! garde-fou longueur -> tokenize -> analyse (équilibre + profondeur, puis arbre)
//!        -> par niveau : groupes (substitutions) -> opérandes -> moins de tête
//!        -> passe * / (gauche d’abord) -> passe + - (gauche d’abord)
//!
//! Toute erreur de syntaxe est signalée avant la moindre conversion de littéral.

use std::fmt;
use std::str::FromStr;

use log::{debug, log_enabled, trace, Level};
use rust_decimal::Decimal;

use super::analyse::analyse;
use super::erreur::{ErreurEval, ResultatEval};
use super::expr::{Chaine, Op, Operande};
use super::jetons::{format_tokens, tokenize, Jeton};
use super::limites::Limites;
use super::substitutions::{marqueur, Substitutions};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    /// Arbre reconstruit (forme compacte).
    pub forme: String,
    pub profondeur: usize,
    /// Substitutions, réécritures et réductions, dans l’ordre d’exécution.
    pub etapes: Vec<String>,
    /// Registre final (indice = marqueur #i).
    pub substitutions: Vec<Decimal>,
}

/// API publique : évalue une expression (limites par défaut).
pub fn eval_expression(expr: &str) -> ResultatEval<Decimal> {
    eval_avec_limites(expr, &Limites::default())
}

pub fn eval_avec_limites(expr: &str, limites: &Limites) -> ResultatEval<Decimal> {
    let (_jetons, chaine) = prepare(expr, limites)?;

    let v = Evaluateur::new(false).chaine(&chaine)?;
    debug!("{expr} = {v}");
    Ok(v)
}

/// Comme `eval_avec_limites`, avec la démarche complète.
pub fn eval_detaille(expr: &str, limites: &Limites) -> ResultatEval<(Decimal, Demarche)> {
    let (jetons, chaine) = prepare(expr, limites)?;

    let mut ev = Evaluateur::new(true);
    let v = ev.chaine(&chaine)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        forme: chaine.to_string(),
        profondeur: chaine.profondeur(),
        etapes: ev.etapes.unwrap_or_default(),
        substitutions: ev.substitutions.into_vec(),
    };

    debug!(
        "{expr} = {v} ({} étapes, {} substitutions)",
        d.etapes.len(),
        d.substitutions.len()
    );
    Ok((v, d))
}

fn prepare(expr: &str, limites: &Limites) -> ResultatEval<(Vec<Jeton>, Chaine)> {
    if expr.len() > limites.longueur_max {
        return Err(ErreurEval::EntreeTropLongue {
            longueur: expr.len(),
            limite: limites.longueur_max,
        });
    }

    let jetons = tokenize(expr)?;
    let chaine = analyse(&jetons, limites.profondeur_effective(), expr.len())?;
    Ok((jetons, chaine))
}

fn valeur_litteral(lexeme: &str) -> ResultatEval<Decimal> {
    Decimal::from_str(lexeme)
        .map_err(|e| ErreurEval::arithmetique(format!("littéral invalide '{lexeme}': {e}")))
}

/// Forme d’une opérande après réécriture du niveau.
#[derive(Clone, Copy)]
enum Forme<'a> {
    Litteral(&'a str),
    Marqueur(usize),
}

impl fmt::Display for Forme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forme::Litteral(s) => f.write_str(s),
            Forme::Marqueur(i) => f.write_str(&marqueur(*i)),
        }
    }
}

fn reecriture(formes: &[Forme<'_>], operateurs: &[Op]) -> String {
    let mut out = formes.first().map(|f| f.to_string()).unwrap_or_default();
    for (op, f) in operateurs.iter().zip(formes.iter().skip(1)) {
        out.push(op.symbole());
        out.push_str(&f.to_string());
    }
    out
}

struct Evaluateur {
    substitutions: Substitutions,
    etapes: Option<Vec<String>>,
}

impl Evaluateur {
    fn new(avec_demarche: bool) -> Self {
        Self {
            substitutions: Substitutions::new(),
            etapes: avec_demarche.then(Vec::new),
        }
    }

    /// Note une étape (démarche et/ou log trace). Le texte n’est construit que si besoin.
    fn note(&mut self, ligne: impl FnOnce() -> String) {
        let tracer = log_enabled!(Level::Trace);
        if self.etapes.is_none() && !tracer {
            return;
        }

        let ligne = ligne();
        trace!("{ligne}");
        if let Some(etapes) = self.etapes.as_mut() {
            etapes.push(ligne);
        }
    }

    fn valeur_marqueur(&self, indice: usize) -> ResultatEval<Decimal> {
        self.substitutions.get(indice).ok_or_else(|| {
            ErreurEval::syntaxe(
                format!("substitution inconnue: {}", marqueur(indice)),
                None,
            )
        })
    }

    /// Évalue un niveau. Récursion bornée par la profondeur vérifiée à l’analyse.
    fn chaine(&mut self, c: &Chaine) -> ResultatEval<Decimal> {
        // 1) Groupes d’abord (gauche -> droite, les plus internes en premier)
        let mut formes: Vec<Forme<'_>> = Vec::with_capacity(c.operandes.len());
        for o in &c.operandes {
            let forme = match o {
                Operande::Litteral { lexeme, .. } => Forme::Litteral(lexeme.as_str()),
                Operande::Groupe(g) => {
                    let v = self.chaine(g)?;
                    let i = self.substitutions.ajoute(v);
                    self.note(|| format!("{} = ({g}) = {v}", marqueur(i)));
                    Forme::Marqueur(i)
                }
            };
            formes.push(forme);
        }

        // 2) Chaque opérande : littéral ou marqueur
        let mut valeurs: Vec<Decimal> = Vec::with_capacity(formes.len());
        for f in &formes {
            let v = match *f {
                Forme::Litteral(lexeme) => valeur_litteral(lexeme)?,
                Forme::Marqueur(i) => self.valeur_marqueur(i)?,
            };
            valeurs.push(v);
        }

        // 3) Moins de tête : ne s’applique qu’à la première opérande
        if c.moins_en_tete {
            if let (Some(v0), Some(f0)) = (valeurs.first_mut(), formes.first_mut()) {
                let mut neg = -*v0;
                // pas de "-0" : le zéro reste positif quelle que soit la forme
                if neg.is_zero() {
                    neg.set_sign_positive(true);
                }
                *v0 = neg;

                // "-5" seul reste un littéral : pas de substitution
                if !c.est_litteral_seul() {
                    let avant = *f0;
                    let i = self.substitutions.ajoute(neg);
                    *f0 = Forme::Marqueur(i);
                    self.note(|| format!("{} = -{avant} = {neg}", marqueur(i)));
                }
            }
        }

        if !c.operateurs.is_empty() && formes.iter().any(|f| matches!(f, Forme::Marqueur(_))) {
            self.note(|| format!("=> {}", reecriture(&formes, &c.operateurs)));
        }

        // 4) * et / d’abord, le plus à gauche en premier
        //    (un balayage = même ordre que des réductions successives)
        let mut termes: Vec<Decimal> = Vec::with_capacity(valeurs.len());
        let mut additifs: Vec<Op> = Vec::new();
        let mut restes = valeurs.into_iter();
        termes.extend(restes.next());

        for (op, b) in c.operateurs.iter().copied().zip(restes) {
            if op.est_multiplicatif() {
                if let Some(a) = termes.last_mut() {
                    *a = self.reduit(op, *a, b)?;
                }
            } else {
                additifs.push(op);
                termes.push(b);
            }
        }

        // 5) puis + et -, de gauche à droite
        let mut termes = termes.into_iter();
        let mut acc = termes
            .next()
            .ok_or_else(|| ErreurEval::maths_invalides(None))?;
        for (op, b) in additifs.into_iter().zip(termes) {
            acc = self.reduit(op, acc, b)?;
        }

        // 6) résultat : la seule opérande restante
        Ok(acc)
    }

    /// Remplace le triplet (a, op, b) par son résultat.
    fn reduit(&mut self, op: Op, a: Decimal, b: Decimal) -> ResultatEval<Decimal> {
        let r = op.applique(&a, &b)?;
        self.note(|| format!("{a} {} {b} = {r}", op.symbole()));
        Ok(r)
    }
}
