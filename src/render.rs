use crate::grid_config::GridConfig;
use crate::Solution;

/// Lay the solution's words out on the grid. Blocked cells, and open cells no slot covers, are
/// `None`.
pub fn letter_grid(config: &GridConfig, solution: &Solution) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; config.width()]; config.height()];

    for (slot_id, word) in solution.iter() {
        for ((row, col), letter) in config.slot(slot_id).cells().zip(word.chars()) {
            letters[row][col] = Some(letter);
        }
    }

    letters
}

/// Turn the given grid config and solution into a rendered string, one line per row, with `█`
/// for blocked cells.
pub fn render_grid(config: &GridConfig, solution: &Solution) -> String {
    let letters = letter_grid(config, solution);

    (0..config.height())
        .map(|row| {
            (0..config.width())
                .map(|col| {
                    if config.is_open(row, col) {
                        letters[row][col].unwrap_or(' ')
                    } else {
                        '█'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_list::WordList;
    use crate::solve;

    #[test]
    fn test_render_crossing_words() {
        let config = GridConfig::from_template_str(
            "
#___#
#_###
#_###
#_###
#_##_
",
        )
        .unwrap();
        let words = WordList::from_words(["SIX", "SEVEN", "ONE"]);

        let solution = solve(&config, &words).unwrap().assignment.unwrap();

        assert_eq!(
            render_grid(&config, &solution),
            "█SIX█\n█E███\n█V███\n█E███\n█N██ "
        );
        assert_eq!(letter_grid(&config, &solution)[0][2], Some('I'));
        assert_eq!(letter_grid(&config, &solution)[4][4], None);
    }
}
