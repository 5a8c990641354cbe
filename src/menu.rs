use crate::inventory::Inventory;

const NAME_HEADER: &str = "Bucket Name ";
const COUNT_WIDTH: usize = 7;

/// `" 1. "` + name column + count column
const FIXED_WIDTH: usize = 4 + COUNT_WIDTH;

pub const BANNER: [&str; 6] = [
    "===================================================",
    " ___ ____  ___         _       _     _   _ _   _ _ ",
    "/ __|__ / | _ )_  _ __| |_____| |_  | | | | |_(_) |",
    "\\__ \\|_ \\ | _ \\ || / _| / / -_)  _| | |_| |  _| | |",
    "|___/___/ |___/\\_,_\\__|_\\_\\___|\\__|  \\___/ \\__|_|_|",
    "----------------------- v1.0 ----------------------",
];

pub const USAGE: [&str; 2] = [
    "Enter command and bucket number: eg delete 1 or d 1",
    "Valid commands are: delete, empty, list, help, refresh or quit",
];

/// Width of the name column: longest name rounded up to even, at least the header.
fn name_width(inventory: &Inventory) -> usize {
    let longest = inventory
        .buckets()
        .iter()
        .map(|bucket| bucket.name.chars().count())
        .max()
        .unwrap_or_default();

    (longest + longest % 2).max(NAME_HEADER.len())
}

/// Menu table, one string per line, without trailing newlines.
pub fn render(inventory: &Inventory) -> Vec<String> {
    let width = name_width(inventory);
    let pad = " ".repeat((width - NAME_HEADER.len()) / 2);

    let mut lines = Vec::with_capacity(inventory.len() + 2);
    lines.push(format!(" ID {pad}{NAME_HEADER}{pad}  Size "));
    lines.push("-".repeat(width + FIXED_WIDTH));

    for bucket in inventory.buckets() {
        lines.push(format!(
            "{:>2}. {:<width$}{:>count_width$}",
            bucket.id,
            bucket.name,
            bucket.objects.to_string(),
            count_width = COUNT_WIDTH,
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ObjectCount;

    #[test]
    fn golden_output() {
        let inventory = Inventory::from_counts([
            ("logs", ObjectCount::Known(5)),
            ("my-website-assets-prod", ObjectCount::Known(1234)),
            ("tmp", ObjectCount::Unknown),
        ]);

        let expected = vec![
            " ID      Bucket Name        Size ",
            "---------------------------------",
            " 1. logs                        5",
            " 2. my-website-assets-prod   1234",
            " 3. tmp                         -",
        ];

        assert_eq!(render(&inventory), expected);
    }

    #[test]
    fn short_names_use_header_width() {
        let inventory = Inventory::from_counts([("a", ObjectCount::Known(0))]);
        let lines = render(&inventory);

        assert_eq!(lines[0], " ID Bucket Name   Size ");
        assert_eq!(lines[1], "-".repeat(23));
        assert_eq!(lines[2], " 1. a                 0");
        assert!(lines.iter().all(|line| line.len() == 23));
    }

    #[test]
    fn odd_length_rounds_up() {
        let inventory = Inventory::from_counts([("abcdefghijklm", ObjectCount::Known(3))]);
        let lines = render(&inventory);

        // 13 chars -> 14 wide
        assert_eq!(lines[1].len(), 14 + FIXED_WIDTH);
        assert_eq!(lines[2], " 1. abcdefghijklm       3");
    }

    #[test]
    fn two_digit_ids_line_up() {
        let inventory = Inventory::from_counts(
            (0..10).map(|i| (format!("bucket-{i}"), ObjectCount::Known(i))),
        );
        let lines = render(&inventory);

        assert!(lines[2].starts_with(" 1. bucket-0"));
        assert!(lines[11].starts_with("10. bucket-9"));
        assert_eq!(lines[2].len(), lines[11].len());
    }

    #[test]
    fn lower_bound_counts_keep_the_row_width() {
        let inventory = Inventory::from_counts([("a", ObjectCount::AtLeast(5000))]);
        let lines = render(&inventory);

        assert_eq!(lines[2], format!(" 1. a{}5000+", " ".repeat(13)));
        assert_eq!(lines[2].len(), lines[1].len());
    }

    #[test]
    fn render_is_deterministic() {
        let inventory = Inventory::from_counts([("x", ObjectCount::Unknown)]);
        assert_eq!(render(&inventory), render(&inventory));
    }
}
