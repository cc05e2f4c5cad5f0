use uuid::Uuid;

/// The score facts the recalculator needs about one player.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRow {
    pub id: Uuid,
    pub xp: i64,
    /// Creation sequence; breaks ties between equal XP scores.
    pub seq: i64,
}

/// Assign dense ranks 1..N over the given rows.
///
/// Ordering is XP descending, then creation sequence ascending, so the
/// assignment is deterministic and repeatable for identical inputs. The
/// returned pairs are (player id, rank) in rank order.
pub fn dense_rank_assignments(rows: &[ScoreRow]) -> Vec<(Uuid, i64)> {
    let mut ordered: Vec<&ScoreRow> = rows.iter().collect();
    ordered.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.seq.cmp(&b.seq)));

    ordered
        .into_iter()
        .zip(1i64..)
        .map(|(row, rank)| (row.id, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ScoreRow, dense_rank_assignments};
    use uuid::Uuid;

    fn row(xp: i64, seq: i64) -> ScoreRow {
        ScoreRow {
            id: Uuid::new_v4(),
            xp,
            seq,
        }
    }

    #[test]
    fn ranks_are_dense_and_descend_by_xp() {
        let rows = [row(50, 1), row(30, 2), row(70, 3), row(10, 4)];
        let ranks = dense_rank_assignments(&rows);

        assert_eq!(ranks.len(), 4);
        assert_eq!(ranks[0], (rows[2].id, 1));
        assert_eq!(ranks[1], (rows[0].id, 2));
        assert_eq!(ranks[2], (rows[1].id, 3));
        assert_eq!(ranks[3], (rows[3].id, 4));
    }

    #[test]
    fn equal_xp_ties_break_by_creation_order() {
        let a = row(50, 1);
        let b = row(30, 2);
        let c = row(30, 3);
        let ranks = dense_rank_assignments(&[c, a, b]);

        assert_eq!(ranks, vec![(a.id, 1), (b.id, 2), (c.id, 3)]);
    }

    #[test]
    fn empty_set_yields_no_assignments() {
        assert!(dense_rank_assignments(&[]).is_empty());
    }

    #[test]
    fn assignment_is_deterministic_for_identical_inputs() {
        let rows = [row(40, 1), row(40, 2), row(40, 3), row(99, 4)];
        assert_eq!(
            dense_rank_assignments(&rows),
            dense_rank_assignments(&rows)
        );
    }

    #[test]
    fn every_rank_between_one_and_n_appears_exactly_once() {
        let rows: Vec<ScoreRow> = (0..20).map(|i| row(i % 5, i)).collect();
        let mut assigned: Vec<i64> = dense_rank_assignments(&rows)
            .into_iter()
            .map(|(_, rank)| rank)
            .collect();
        assigned.sort_unstable();

        assert_eq!(assigned, (1..=20).collect::<Vec<i64>>());
    }
}
