//! Minimum-cost bipartite assignment (Hungarian / Kuhn–Munkres algorithm),
//! O(n^3) in the larger of the two dimensions.
//!
//! This is original logic internal to the crate: the Python prototype this
//! system was distilled from reached for an external `lapacho` package, and
//! no equivalent assignment-problem crate appears in the reference corpus
//! (see SPEC_FULL.md §4.C). The algorithm itself is the textbook primal-dual
//! method (as presented on cp-algorithms.com), adapted to operate on
//! rectangular matrices by transposing when there are more rows than
//! columns.

/// Costs are scaled to fixed-point integers before running the algorithm,
/// which is only numerically solid over exact arithmetic — the Line
/// Matcher's costs live in `[0.0, 1.0]` so this retains ample precision.
const SCALE: f64 = 1_000_000.0;

/// Solves the assignment problem for a `rows x cols` cost matrix, returning
/// one `(row, col)` pair per matched row (or column, if `cols < rows`) --
/// i.e. `min(rows, cols)` pairs, each minimizing total cost. Surplus rows or
/// columns beyond `min(rows, cols)` simply do not appear in the result.
pub fn solve(cost: &[Vec<f64>]) -> Vec<(usize, usize)> {
    let rows = cost.len();
    if rows == 0 {
        return Vec::new();
    }
    let cols = cost[0].len();
    if cols == 0 {
        return Vec::new();
    }

    if rows <= cols {
        solve_n_le_m(cost, rows, cols)
    } else {
        // Transpose: solve with roles of rows/cols swapped, then swap back.
        let mut transposed = vec![vec![0.0; rows]; cols];
        for (r, row) in cost.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                transposed[c][r] = value;
            }
        }
        solve_n_le_m(&transposed, cols, rows)
            .into_iter()
            .map(|(c, r)| (r, c))
            .collect()
    }
}

/// Requires `n <= m`. 1-indexed internally (row/col 0 is the "unassigned"
/// sentinel), per the classical presentation of the algorithm.
fn solve_n_le_m(cost: &[Vec<f64>], n: usize, m: usize) -> Vec<(usize, usize)> {
    let a = |i: usize, j: usize| -> i64 { (cost[i - 1][j - 1] * SCALE).round() as i64 };

    const INF: i64 = i64::MAX / 4;

    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![INF; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=m {
                if !used[j] {
                    let cur = a(i0, j) - u[i0] - v[j];
                    if cur < minv[j] {
                        minv[j] = cur;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pairs = Vec::with_capacity(n);
    for j in 1..=m {
        if p[j] != 0 {
            pairs.push((p[j] - 1, j - 1));
        }
    }
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_cost(cost: &[Vec<f64>], pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(r, c)| cost[r][c]).sum()
    }

    #[test]
    fn empty_matrix() {
        assert!(solve(&[]).is_empty());
    }

    #[test]
    fn square_matrix_minimizes_total_cost() {
        let cost = vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ];
        let pairs = solve(&cost);
        assert_eq!(pairs.len(), 3);
        // Known optimum for this matrix is 1 + 2 + 2 = 5 via (0,2)(1,1)(2,0)
        // or any assignment reaching the same minimum.
        assert_eq!(total_cost(&cost, &pairs), 5.0);
    }

    #[test]
    fn more_rows_than_cols_leaves_surplus_rows_unassigned() {
        let cost = vec![vec![1.0], vec![0.5], vec![0.9]];
        let pairs = solve(&cost);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, 0);
        // The cheapest row (index 1, cost 0.5) is the one assigned.
        assert_eq!(pairs[0].0, 1);
    }

    #[test]
    fn more_cols_than_rows_leaves_surplus_cols_unassigned() {
        let cost = vec![vec![1.0, 0.2, 0.8]];
        let pairs = solve(&cost);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], (0, 1));
    }

    #[test]
    fn each_assigned_pair_is_distinct_row_and_col() {
        let cost = vec![
            vec![0.9, 0.1, 0.4, 0.8],
            vec![0.3, 0.7, 0.2, 0.6],
            vec![0.5, 0.5, 0.5, 0.1],
        ];
        let pairs = solve(&cost);
        assert_eq!(pairs.len(), 3);
        let rows: std::collections::HashSet<_> = pairs.iter().map(|p| p.0).collect();
        let cols: std::collections::HashSet<_> = pairs.iter().map(|p| p.1).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(cols.len(), 3);
    }
}
