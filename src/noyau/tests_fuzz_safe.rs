//! Tests fuzz safe : robustesse + déterminisme + oracle rationnel exact.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle BigRational : le générateur ne produit que des valeurs représentables
//!   exactement en décimal (diviseurs 2 et 5, peu de chiffres significatifs),
//!   donc résultat décimal == résultat rationnel, au chiffre près.
//! - seule erreur attendue sur les expressions générées : division par zéro

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::Decimal;

use super::expr::Op;
use super::{eval_detaille, eval_expression, Limites};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Oracle ------------------------ */

/// Expression générée + valeur exacte attendue (None = division par zéro attendue).
#[derive(Clone, Debug)]
struct Cas {
    texte: String,
    valeur: Option<BigRational>,
}

fn rat(num: i64, den: i64) -> BigRational {
    BigRational::new(BigInt::from(num), BigInt::from(den))
}

fn decimal_vers_rat(d: Decimal) -> BigRational {
    let scale = BigInt::from(10).pow(d.scale());
    BigRational::new(BigInt::from(d.mantissa()), scale)
}

fn applique(op: Op, a: &Option<BigRational>, b: &Option<BigRational>) -> Option<BigRational> {
    match (a, b) {
        (Some(a), Some(b)) => op.applique(a, b).ok(),
        _ => None,
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_feuille(rng: &mut Rng) -> Cas {
    let (texte, valeur) = match rng.pick(12) {
        10 => ("0.5".to_string(), rat(1, 2)),
        11 => ("1.5".to_string(), rat(3, 2)),
        k => (k.to_string(), rat(i64::from(k), 1)),
    };
    Cas {
        texte,
        valeur: Some(valeur),
    }
}

fn gen_op_sans_division(rng: &mut Rng) -> Op {
    match rng.pick(3) {
        0 => Op::Add,
        1 => Op::Sub,
        _ => Op::Mul,
    }
}

/// Facteur auto-délimité : littéral ou groupe parenthésé.
fn gen_facteur(rng: &mut Rng, depth: usize) -> Cas {
    if depth == 0 || rng.pick(3) == 0 {
        return gen_feuille(rng);
    }

    match rng.pick(4) {
        // moins de tête dans un groupe : (-x)
        0 => {
            let x = gen_facteur(rng, depth - 1);
            Cas {
                texte: format!("(-{})", x.texte),
                valeur: x.valeur.map(|v| -v),
            }
        }
        // division par 2, 5 ou 0 (exacte en décimal, ou erreur attendue)
        1 => {
            let a = gen_facteur(rng, depth - 1);
            let d = match rng.pick(3) {
                0 => 2,
                1 => 5,
                _ => 0,
            };
            Cas {
                texte: format!("({}/{d})", a.texte),
                valeur: applique(Op::Div, &a.valeur, &Some(rat(d, 1))),
            }
        }
        _ => {
            let a = gen_facteur(rng, depth - 1);
            let b = gen_facteur(rng, depth - 1);
            let op = gen_op_sans_division(rng);
            Cas {
                texte: format!("({}{}{})", a.texte, op.symbole(), b.texte),
                valeur: applique(op, &a.valeur, &b.valeur),
            }
        }
    }
}

/// Chaîne plate "[-]x op1 y op2 z" : teste priorités + associativité sans parenthèses.
fn gen_chaine(rng: &mut Rng, depth: usize) -> Cas {
    let moins = rng.coin();
    let x = gen_facteur(rng, depth);
    let y = gen_facteur(rng, depth);
    let z = gen_facteur(rng, depth);
    let op1 = gen_op_sans_division(rng);
    let op2 = gen_op_sans_division(rng);

    let x_val = if moins { x.valeur.map(|v| -v) } else { x.valeur };

    // priorité : seul "a + b * c" (ou "a - b * c") se regroupe à droite
    let valeur = if op2.est_multiplicatif() && !op1.est_multiplicatif() {
        applique(op1, &x_val, &applique(op2, &y.valeur, &z.valeur))
    } else {
        applique(op2, &applique(op1, &x_val, &y.valeur), &z.valeur)
    };

    Cas {
        texte: format!(
            "{}{}{}{}{}{}",
            if moins { "-" } else { "" },
            x.texte,
            op1.symbole(),
            y.texte,
            op2.symbole(),
            z.texte
        ),
        valeur,
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_oracle_rationnel() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let cas = gen_chaine(&mut rng, 2);

        match (eval_expression(&cas.texte), &cas.valeur) {
            (Ok(v), Some(attendu)) => {
                assert_eq!(
                    &decimal_vers_rat(v),
                    attendu,
                    "expr={:?} décimal={v}",
                    cas.texte
                );
                seen_ok += 1;
            }
            (Err(e), None) => {
                assert!(
                    e.est_arithmetique() && e.to_string().contains("division par zéro"),
                    "erreur non attendue: expr={:?} err={e}",
                    cas.texte
                );
                seen_err += 1;
            }
            (Ok(v), None) => panic!("expr={:?} : division par zéro attendue, obtenu {v}", cas.texte),
            (Err(e), Some(attendu)) => {
                panic!("expr={:?} : attendu {attendu}, erreur {e}", cas.texte)
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // Même seed => mêmes expressions => mêmes sorties (valeur + démarche)
    let mut rng_a = Rng::new(0xBADC0DE_u64);
    let mut rng_b = Rng::new(0xBADC0DE_u64);

    for _ in 0..80 {
        budget(t0, max);

        let a = gen_chaine(&mut rng_a, 3);
        let b = gen_chaine(&mut rng_b, 3);
        assert_eq!(a.texte, b.texte);

        let ra = eval_detaille(&a.texte, &Limites::default());
        let rb = eval_detaille(&b.texte, &Limites::default());
        assert_eq!(ra, rb, "expr={:?}", a.texte);
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // Entrées quelconques sur l’alphabet du langage (+ espace) : jamais de panique,
    // et seulement des erreurs de syntaxe ou d’arithmétique (pas de garde-fou à cette taille).
    const ALPHABET: &[u8] = b"0123456789.+-*/() ";
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let n = rng.pick(24) as usize;
        let s: String = (0..n)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize] as char)
            .collect();

        if let Err(e) = eval_expression(&s) {
            assert!(
                e.est_syntaxe() || e.est_arithmetique(),
                "erreur non attendue: expr={s:?} err={e}"
            );
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, Decimal::from(400));
}
