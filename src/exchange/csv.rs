use crate::constants::labels::{UNRANKED, YOUR_PICK};
use crate::matrix::MatchupMatrix;
use crate::registry::RankRegistry;
use crate::types::Character;

/// Quote a field only when it needs it (RFC 4180)
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Flatten one matrix into a table keyed by roster names
///
/// Diagonal cells are blank, resolved ranks are always quoted and unknown ids
/// become `Unranked`. Rows are joined with `\n`, without a trailing newline.
pub fn export_csv(roster: &[Character], registry: &RankRegistry, matrix: &MatchupMatrix) -> String {
    let mut lines = Vec::with_capacity(roster.len() + 1);

    let header: Vec<String> = std::iter::once(escape_field(YOUR_PICK))
        .chain(roster.iter().map(|c| escape_field(&c.name)))
        .collect();
    lines.push(header.join(","));

    for (row, character) in roster.iter().enumerate() {
        let mut fields = Vec::with_capacity(roster.len() + 1);
        fields.push(escape_field(&character.name));
        for col in 0..roster.len() {
            if row == col {
                fields.push(String::new());
                continue;
            }
            let rank = matrix.get(row, col).and_then(|id| registry.by_id(id));
            fields.push(match rank {
                Some(rank) => quote(&rank.name),
                None => UNRANKED.to_string(),
            });
        }
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rank, RankId};

    fn rank(id: i64, name: &str) -> Rank {
        Rank {
            id: RankId::Num(id),
            name: name.to_string(),
            description: String::new(),
            color_tag: String::new(),
            selected_color_tag: String::new(),
        }
    }

    #[test]
    fn test_two_character_table() {
        let roster = vec![Character::new("X", ""), Character::new("Y", "")];
        let registry = RankRegistry::from_ranks(vec![rank(1, "Even")]);
        let matrix = MatchupMatrix::create(2, &RankId::Num(1));
        assert_eq!(
            export_csv(&roster, &registry, &matrix),
            "Your Pick,X,Y\nX,,\"Even\"\nY,\"Even\","
        );
    }

    #[test]
    fn test_unresolved_rank_is_unranked() {
        let roster = vec![Character::new("X", ""), Character::new("Y", "")];
        let registry = RankRegistry::from_ranks(vec![rank(1, "Even")]);
        let matrix = MatchupMatrix::create(2, &RankId::Num(42));
        assert_eq!(
            export_csv(&roster, &registry, &matrix),
            "Your Pick,X,Y\nX,,Unranked\nY,Unranked,"
        );
    }

    #[test]
    fn test_quotes_are_doubled() {
        let roster = vec![Character::new("Lt. Morales, \"Medic\"", ""), Character::new("Y", "")];
        let registry = RankRegistry::from_ranks(vec![rank(1, "Say \"hi\"")]);
        let matrix = MatchupMatrix::create(2, &RankId::Num(1));
        let csv = export_csv(&roster, &registry, &matrix);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Your Pick,\"Lt. Morales, \"\"Medic\"\"\",Y");
        assert_eq!(lines[1], "\"Lt. Morales, \"\"Medic\"\"\",,\"Say \"\"hi\"\"\"");
    }

    #[test]
    fn test_empty_roster_is_header_only() {
        let registry = RankRegistry::from_ranks(Vec::new());
        assert_eq!(export_csv(&[], &registry, &MatchupMatrix::create(0, &RankId::Num(3))), "Your Pick");
    }
}
