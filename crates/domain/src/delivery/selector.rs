//! Delivery-plan selection: a weight-bounded 0/1 knapsack over the
//! pending shipping orders.
//!
//! The selector maximises total payload value under the robot's weight
//! capacity using bitset-accelerated dynamic programming:
//!
//! - weights and the capacity are compressed by their common divisor;
//! - a reachability bitset marks which exact weight sums are achievable,
//!   so the per-item update walks only populated DP cells, word at a
//!   time, via the highest-set-bit intrinsic;
//! - a per-item choice bitset records which cells the item updated and
//!   is the authoritative reconstruction trace.
//!
//! Updates use strict `>`: an equal-valued alternative never overwrites
//! an existing cell. Combined with the lightest-optimum reconstruction
//! start this makes the selector a deterministic function of its input.
//!
//! The selector is pure and CPU-bound. Its only suspension point is the
//! `should_cancel` probe, polled every [`CHECK_EVERY`] cell updates.

use super::bitset::{highest_bit, mask_up_to, BitRow, ChoiceMatrix};
use super::{Cancelled, DeliveryPlan, RobotId, ShippingOrder};

// =============================================================================
// Constants
// =============================================================================

/// Number of DP cell updates between cancellation polls.
pub const CHECK_EVERY: u64 = 8192;

const WORD_BITS: usize = 64;

// =============================================================================
// select_orders
// =============================================================================

/// Chooses the subset of `orders` a robot with the given weight
/// `capacity` should carry, maximising total value.
///
/// The returned plan lists the selected orders in input order. For
/// identical inputs the same subset is returned; among equally valuable
/// subsets the lightest one wins, and within that the reconstruction
/// prefers skipping later items.
///
/// `should_cancel` is polled periodically; once it reports `true` the
/// run aborts with [`Cancelled`] and no partial result.
///
/// # Errors
///
/// Returns [`Cancelled`] when `should_cancel` fires mid-run.
pub fn select_orders<F>(
    robot_id: &RobotId,
    orders: &[ShippingOrder],
    capacity: i64,
    mut should_cancel: F,
) -> Result<DeliveryPlan, Cancelled>
where
    F: FnMut() -> bool,
{
    let item_count = orders.len();
    if item_count == 0 || capacity <= 0 {
        return Ok(DeliveryPlan::empty(robot_id.clone()));
    }

    // Everything fits: skip the DP entirely.
    let total_weight: i64 = orders.iter().map(ShippingOrder::weight).sum();
    if total_weight <= capacity {
        return Ok(DeliveryPlan::assemble(robot_id.clone(), orders.to_vec()));
    }

    // Compress weights and capacity by their common divisor. The input
    // slice is never mutated; callers may reuse it.
    let mut weights: Vec<i64> = orders.iter().map(ShippingOrder::weight).collect();
    let mut divisor = 0;
    for &weight in &weights {
        if weight > 0 {
            divisor = gcd(divisor, weight);
        }
    }
    let mut budget = capacity;
    if divisor > 1 {
        for weight in &mut weights {
            if *weight > 0 {
                *weight /= divisor;
            }
        }
        budget /= divisor;
    }

    let cells = budget as usize;

    let mut dp_prev = vec![0i64; cells + 1];
    let mut dp_cur = vec![0i64; cells + 1];

    let mut reach_prev = BitRow::new(cells + 1);
    let mut reach_cur = BitRow::new(cells + 1);
    reach_prev.set(0);
    let mut reach_hi_prev = 0usize;

    let mut choose = ChoiceMatrix::new(item_count + 1, cells + 1);

    let mut steps: u64 = 0;

    for item in 1..=item_count {
        let weight = weights[item - 1];
        let value = orders[item - 1].value();

        // Default is "don't take": carry the previous row forward.
        dp_cur.copy_from_slice(&dp_prev);
        reach_cur.copy_from(&reach_prev);
        let mut reach_hi_cur = reach_hi_prev;

        if weight > 0 && weight <= budget && value >= 0 {
            let item_weight = weight as usize;
            // Only bases with base + weight <= budget can produce a cell.
            let base_limit = reach_hi_prev.min(cells - item_weight);
            let last_word = base_limit / WORD_BITS;

            for word_index in (0..=last_word).rev() {
                let mut word = reach_prev.word(word_index);
                if word_index == last_word {
                    word &= mask_up_to(base_limit % WORD_BITS);
                }
                while word != 0 {
                    let bit = highest_bit(word);
                    let base = word_index * WORD_BITS + bit;
                    let cell = base + item_weight;

                    steps += 1;
                    if steps % CHECK_EVERY == 0 && should_cancel() {
                        return Err(Cancelled);
                    }

                    // Strictly greater only: equal values keep the
                    // earlier choice.
                    let candidate = dp_prev[base] + value;
                    if candidate > dp_cur[cell] {
                        dp_cur[cell] = candidate;
                        choose.set(item, cell);
                        if !reach_cur.contains(cell) {
                            reach_cur.set(cell);
                            if cell > reach_hi_cur {
                                reach_hi_cur = cell;
                            }
                        }
                    }

                    word &= !(1u64 << bit);
                }
            }
        }

        std::mem::swap(&mut dp_prev, &mut dp_cur);
        std::mem::swap(&mut reach_prev, &mut reach_cur);
        reach_hi_prev = reach_hi_cur;
    }

    // Best value over the whole row; the smallest weight achieving it is
    // the reconstruction start, so equally valuable plans resolve to the
    // lightest one.
    let mut best_value = 0i64;
    let mut best_cell = 0usize;
    for (cell, &cell_value) in dp_prev.iter().enumerate() {
        if cell_value > best_value {
            best_value = cell_value;
            best_cell = cell;
        }
    }

    let mut selected = vec![false; item_count];
    let mut cell = best_cell;
    for item in (1..=item_count).rev() {
        if choose.contains(item, cell) {
            selected[item - 1] = true;
            cell -= weights[item - 1] as usize;
        }
    }
    debug_assert_eq!(cell, 0);

    // Weightless orders ride along for free whenever they carry value.
    for (index, order) in orders.iter().enumerate() {
        if order.weight() == 0 && order.value() > 0 {
            selected[index] = true;
        }
    }

    if should_cancel() {
        return Err(Cancelled);
    }

    let chosen: Vec<ShippingOrder> = orders
        .iter()
        .zip(selected.iter())
        .filter_map(|(order, &taken)| taken.then_some(*order))
        .collect();

    Ok(DeliveryPlan::assemble(robot_id.clone(), chosen))
}

// =============================================================================
// gcd
// =============================================================================

fn gcd(mut left: i64, mut right: i64) -> i64 {
    if left == 0 {
        return right.abs();
    }
    while right != 0 {
        (left, right) = (right, left % right);
    }
    left.abs()
}

// =============================================================================
// Tests
// =============================================================================
