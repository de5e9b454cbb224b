// src/noyau/arith.rs
//
// Opérations binaires “à plancher” + puissance gardée.
//
// Rust tronque vers zéro pour `/` entier et `%` ; ici on veut le plancher
// (vers -∞) : -7 // 2 == -4 et -7 % 2 == 1 (le reste prend le signe du diviseur).

use num_traits::Float;

use super::erreurs::ArithError;
use super::politique::Politique;

/// (quotient plancher, reste) avec reste du signe du diviseur.
pub fn divmod<F: Float>(a: F, b: F) -> Result<(F, F), ArithError> {
    if b.is_zero() {
        return Err(ArithError::DivisionByZero);
    }

    // `%` flottant = fmod (signe du dividende) : on corrige ensuite.
    let mut reste = a % b;
    let mut q = (a - reste) / b;

    if !reste.is_zero() {
        if (b < F::zero()) != (reste < F::zero()) {
            reste = reste + b;
            q = q - F::one();
        }
    } else {
        reste = F::zero().copysign(b);
    }

    // q est “presque” entier : on l’arrondit au plus proche
    let plancher = if !q.is_zero() {
        let mut f = q.floor();
        let demi = F::one() / (F::one() + F::one());
        if q - f > demi {
            f = f + F::one();
        }
        f
    } else {
        F::zero().copysign(a / b)
    };

    Ok((plancher, reste))
}

pub fn floor_div<F: Float>(a: F, b: F) -> Result<F, ArithError> {
    divmod(a, b).map(|(q, _)| q)
}

pub fn modulo<F: Float>(a: F, b: F) -> Result<F, ArithError> {
    divmod(a, b).map(|(_, r)| r)
}

pub fn division<F: Float>(a: F, b: F) -> Result<F, ArithError> {
    if b.is_zero() {
        return Err(ArithError::DivisionByZero);
    }
    Ok(a / b)
}

/// `base ** exposant`, refusé AVANT calcul si la politique l’exige.
pub fn puissance(base: f64, exposant: f64, politique: &Politique) -> Result<f64, ArithError> {
    if politique.puissance_refusee(base, exposant) {
        return Err(ArithError::ExponentTooLarge);
    }
    if base == 0.0 && exposant < 0.0 {
        return Err(ArithError::DivisionByZero);
    }
    if base < 0.0 && exposant.is_finite() && exposant.fract() != 0.0 {
        return Err(ArithError::ComplexResult);
    }

    let r = base.powf(exposant);
    if r.is_infinite() && base.is_finite() && exposant.is_finite() {
        return Err(ArithError::Overflow);
    }
    Ok(r)
}
