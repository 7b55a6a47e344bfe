//! Shell text: `export NAME=VALUE` or bare `NAME=VALUE` lines.

use std::sync::LazyLock;

use regex::Regex;

use super::special::SpecialVars;
use crate::record::EnvironmentVariable;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?([_a-zA-Z0-9]+)=(\S.*)$").expect("valid regex")
});

/// Read one definition per line. Lines that are not assignments (comments,
/// blanks, `NAME=` with nothing after it) are skipped.
pub fn from_bash_expression(text: &str) -> Vec<EnvironmentVariable> {
    text.lines()
        .filter_map(|line| {
            let caps = ASSIGNMENT.captures(line.trim())?;
            Some(EnvironmentVariable::new(&caps[1], &caps[2]))
        })
        .collect()
}

/// Write records in emission order: by sort group, then name.
///
/// `prefix` is prepended to every line (`"export "` or `""`).
pub fn to_bash_expression<'a, I>(vars: I, prefix: &str, special: &SpecialVars) -> String
where
    I: IntoIterator<Item = &'a EnvironmentVariable>,
{
    let mut sorted: Vec<&EnvironmentVariable> = vars.into_iter().collect();
    sorted.sort_by(|a, b| {
        (a.sort_group.unwrap_or(1), &a.name).cmp(&(b.sort_group.unwrap_or(1), &b.name))
    });
    sorted
        .iter()
        .map(|ev| format!("{prefix}{}={}", ev.name, special.restore(ev)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_exports_and_assignments() {
        let vars = from_bash_expression(
            "export A=1\n  B=$A:x  \n# comment\nexport   C=$(( A + 1 ))\n",
        );
        let pairs: Vec<(&str, &str)> = vars
            .iter()
            .map(|ev| (ev.name.as_str(), ev.value.as_str()))
            .collect();
        assert_eq!(pairs, [("A", "1"), ("B", "$A:x"), ("C", "$(( A + 1 ))")]);
        assert!(vars.iter().all(|ev| ev.sort_group.is_none()));
    }

    #[test]
    fn skips_non_assignments() {
        assert!(from_bash_expression("echo hi\nA=\nA= 1\n=x\n").is_empty());
    }

    #[test]
    fn value_keeps_spaces() {
        let vars = from_bash_expression("export X=$(echo a b)");
        assert_eq!(vars[0].value, "$(echo a b)");
    }

    #[test]
    fn writes_in_group_order() {
        let vars = vec![
            EnvironmentVariable::new("Z", "$A").with_sort_group(2),
            EnvironmentVariable::new("B", "2").with_sort_group(1),
            EnvironmentVariable::new("A", "1").with_sort_group(1),
        ];
        let text = to_bash_expression(&vars, "export ", &SpecialVars::default());
        assert_eq!(text, "export A=1\nexport B=2\nexport Z=$A");
    }

    #[test]
    fn restores_special_prefix() {
        let vars = vec![EnvironmentVariable::new("PATH", "/opt/bin").with_sort_group(1)];
        let text = to_bash_expression(&vars, "", &SpecialVars::default());
        assert_eq!(text, "PATH=$PATH:/opt/bin");
    }
}
