//! Ligne de commande (natif seulement).
//!
//! `calculatrice_decimale "3+4*2" "(1+2"` évalue chaque expression et sort en code 1
//! si au moins une a échoué. Sans expression : interface graphique.
//! Les options peuvent suivre les expressions (`calculatrice_decimale "1+2" --demarche`).

use std::ffi::OsString;

use clap::{Command, CommandFactory, Parser};
use log::warn;

use calculatrice_decimale::noyau::limites::{LONGUEUR_MAX_DEFAUT, PROFONDEUR_MAX_DEFAUT};
use calculatrice_decimale::noyau::{eval_avec_limites, eval_detaille, format_demarche, Limites};

#[derive(Parser, Debug)]
#[command(name = "calculatrice_decimale")]
#[command(about = "Calculatrice décimale exacte : + - * / et parenthèses")]
#[command(version)]
pub struct Cli {
    /// Expressions à évaluer (aucune : lance l’interface graphique)
    #[arg(allow_hyphen_values = true)]
    pub expressions: Vec<String>,

    /// Profondeur maximale d’imbrication des parenthèses
    #[arg(long, default_value_t = PROFONDEUR_MAX_DEFAUT)]
    pub profondeur_max: usize,

    /// Longueur maximale d’une expression (octets)
    #[arg(long, default_value_t = LONGUEUR_MAX_DEFAUT)]
    pub longueur_max: usize,

    /// Affiche la démarche (jetons, substitutions, réductions)
    #[arg(short, long)]
    pub demarche: bool,
}

impl Cli {
    /// Analyse la ligne de commande, options placées n’importe où.
    pub fn depuis_arguments<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        Self::parse_from(ordonne_arguments(args))
    }

    pub fn limites(&self) -> Limites {
        Limites::default()
            .avec_profondeur_max(self.profondeur_max)
            .avec_longueur_max(self.longueur_max)
    }
}

/// Place les options connues devant les expressions, puis `--`.
///
/// Les expressions acceptent un `-` de tête ; sans ce tri, clap prendrait
/// toute option écrite après la première expression pour une expression.
/// Après un `--` explicite, tout est expression.
pub fn ordonne_arguments<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut args = args.into_iter().map(Into::into);
    // nom du programme
    let mut options: Vec<OsString> = args.next().into_iter().collect();
    let mut expressions: Vec<OsString> = Vec::new();

    while let Some(arg) = args.next() {
        let Some(texte) = arg.to_str() else {
            expressions.push(arg);
            continue;
        };

        if texte == "--" {
            expressions.extend(args.by_ref());
            break;
        }

        match option_connue(&cmd, texte) {
            Some(prend_valeur) => {
                options.push(arg);
                if prend_valeur {
                    options.extend(args.next());
                }
            }
            None => expressions.push(arg),
        }
    }

    options.push(OsString::from("--"));
    options.extend(expressions);
    options
}

/// `Some(attend_une_valeur_separee)` si `texte` nomme une option de `cmd`.
fn option_connue(cmd: &Command, texte: &str) -> Option<bool> {
    let (nom, valeur_collee) = match texte.split_once('=') {
        Some((nom, _)) => (nom, true),
        None => (texte, false),
    };

    let longue = nom.strip_prefix("--");
    let courte = nom
        .strip_prefix('-')
        .filter(|r| !r.starts_with('-') && r.chars().count() == 1)
        .and_then(|r| r.chars().next());

    cmd.get_arguments()
        .find(|a| {
            (longue.is_some() && a.get_long() == longue)
                || (courte.is_some() && a.get_short() == courte)
        })
        .map(|a| a.get_action().takes_values() && !valeur_collee)
}

/// Évalue une expression et renvoie le texte à afficher.
pub fn evalue_ligne(expr: &str, limites: &Limites, demarche: bool) -> Result<String, String> {
    let expr = expr.trim();

    let texte = if demarche {
        let (v, d) = eval_detaille(expr, limites).map_err(|e| format!("{expr} : {e}"))?;
        format!("{}{expr} = {v}", format_demarche(&d))
    } else {
        let v = eval_avec_limites(expr, limites).map_err(|e| format!("{expr} : {e}"))?;
        format!("{expr} = {v}")
    };
    Ok(texte)
}

/// Évalue toutes les expressions ; renvoie le code de sortie.
pub fn execute(cli: &Cli) -> i32 {
    let limites = cli.limites();
    let mut code = 0;

    for expr in &cli.expressions {
        match evalue_ligne(expr, &limites, cli.demarche) {
            Ok(texte) => println!("{texte}"),
            Err(msg) => {
                warn!("{msg}");
                eprintln!("{msg}");
                code = 1;
            }
        }
    }

    code
}
