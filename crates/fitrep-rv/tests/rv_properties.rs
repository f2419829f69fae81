use fitrep_rv::workflows::fitrep::{
    compute_rv, recalculate, BaselineProfile, Category, RankProfile, Report, ReportCollection,
    ScoreLetter, UnroundingLookup,
};
use proptest::prelude::*;

fn observed_letter() -> impl Strategy<Value = ScoreLetter> {
    (0usize..7).prop_map(|index| ScoreLetter::ordered()[index])
}

fn replay(letters: &[ScoreLetter]) -> (RankProfile, ReportCollection) {
    let origin = RankProfile::from_baseline("Original", &BaselineProfile::empty("Capt"))
        .expect("empty baseline is valid");
    let mut working = origin.clone();
    let mut reports: ReportCollection = letters
        .iter()
        .enumerate()
        .map(|(index, letter)| {
            Report::with_letters(
                "Capt",
                format!("R{index}"),
                Category::ordered().map(|category| (category, *letter)),
            )
        })
        .collect();
    recalculate(&origin, &mut working, &mut reports);
    (working, reports)
}

proptest! {
    #[test]
    fn rv_never_decreases_with_report_average(
        first in 0.0f64..7.0,
        second in 0.0f64..7.0,
        count in 3u64..500,
        bound in 0.0f64..7.0,
        spread in 0.0f64..3.0,
    ) {
        let (lower, upper) = if first <= second { (first, second) } else { (second, first) };
        let high = bound + spread;
        prop_assert!(compute_rv(lower, count, high, bound) <= compute_rv(upper, count, high, bound));
    }

    #[test]
    fn rv_is_floored_at_eighty(
        average in 0.0f64..7.0,
        count in 3u64..500,
        high in 0.0f64..7.0,
        bound in 0.0f64..7.0,
    ) {
        prop_assert!(compute_rv(average, count, high, bound) >= 80.0);
    }

    #[test]
    fn small_profiles_report_zero(
        average in 0.0f64..7.0,
        count in 0u64..3,
        high in 0.0f64..7.0,
        bound in 0.0f64..7.0,
    ) {
        prop_assert_eq!(compute_rv(average, count, high, bound), 0.0);
    }

    #[test]
    fn flat_profiles_report_ninety(
        average in 0.0f64..7.0,
        count in 3u64..500,
        bound in 0.0f64..7.0,
        offset in -0.00009f64..0.00009,
    ) {
        prop_assert_eq!(compute_rv(average, count, bound + offset, bound), 90.0);
    }

    #[test]
    fn replay_brackets_every_report(letters in prop::collection::vec(observed_letter(), 1..12)) {
        let (_, reports) = replay(&letters);
        for report in &reports {
            prop_assert!(report.rv_process_min() <= report.rv_process_max());
            prop_assert!(report.rv_cumulative_min() <= report.rv_cumulative_max());
        }
    }

    #[test]
    fn replay_average_matches_arithmetic_mean(
        letters in prop::collection::vec(observed_letter(), 1..20),
    ) {
        let (working, _) = replay(&letters);
        let mean = letters.iter().map(|letter| f64::from(letter.value())).sum::<f64>()
            / letters.len() as f64;
        prop_assert_eq!(working.count, letters.len() as u64);
        prop_assert!((working.average - mean).abs() < 1e-9);
    }

    #[test]
    fn rounded_fourteen_mark_averages_unround_exactly(sum in 14u32..=98) {
        let exact = f64::from(sum) / 14.0;
        let rounded = (exact * 100.0).round() / 100.0;
        let recovered = UnroundingLookup::new().unround(rounded);

        prop_assert!((recovered - exact).abs() < 1e-9);
        prop_assert!(recovered >= rounded - 0.01 && recovered <= rounded + 0.01);
    }
}
