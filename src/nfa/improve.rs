use super::rect_log_nfa;
use crate::gradient::GradientField;
use crate::rect::Rectangle;

/// Step used when shrinking the rectangle width.
const WIDTH_STEP: f64 = 0.5;
/// Narrowest width the search may reach.
const MIN_WIDTH: f64 = 0.5;
/// Attempts per variation.
const ROUNDS: usize = 5;

/// Local search for a more meaningful variant of `rect`.
///
/// Variations are tried in a fixed order: finer precisions, narrower
/// widths, trimming one long side, trimming the other long side, and finer
/// precisions again. Each variation starts from the best rectangle so far,
/// and a candidate replaces it only when strictly more meaningful. The
/// search returns as soon as the best value exceeds `log_eps`.
///
/// Returns the best `-log10(NFA)` and the rectangle achieving it.
pub fn improve_rectangle(
    rect: &Rectangle,
    field: &GradientField,
    log_nt: f64,
    log_eps: f64,
) -> (f64, Rectangle) {
    let mut best = *rect;
    let mut best_nfa = rect_log_nfa(&best, field, log_nt);
    if best_nfa > log_eps {
        return (best_nfa, best);
    }

    let variations: [fn(&Rectangle) -> Option<Rectangle>; 5] = [
        finer_precision,
        narrower,
        trim_positive_side,
        trim_negative_side,
        finer_precision,
    ];
    for vary in variations {
        let mut candidate = best;
        for _ in 0..ROUNDS {
            let Some(next) = vary(&candidate) else {
                continue;
            };
            candidate = next;
            let value = rect_log_nfa(&candidate, field, log_nt);
            if value > best_nfa {
                best_nfa = value;
                best = candidate;
            }
        }
        if best_nfa > log_eps {
            break;
        }
    }
    (best_nfa, best)
}

fn finer_precision(r: &Rectangle) -> Option<Rectangle> {
    Some(r.with_precision(r.precision * 0.5))
}

fn narrower(r: &Rectangle) -> Option<Rectangle> {
    if r.width - WIDTH_STEP < MIN_WIDTH {
        return None;
    }
    let mut next = *r;
    next.width -= WIDTH_STEP;
    Some(next)
}

fn trim_positive_side(r: &Rectangle) -> Option<Rectangle> {
    narrower(r).map(|n| n.shifted_across(WIDTH_STEP * 0.5))
}

fn trim_negative_side(r: &Rectangle) -> Option<Rectangle> {
    narrower(r).map(|n| n.shifted_across(-WIDTH_STEP * 0.5))
}
