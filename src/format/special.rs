//! Search-path variables (`PATH`, `LD_LIBRARY_PATH`, ...) are stored without
//! their self-referencing `$NAME:` prefix and get it back on export.

use std::borrow::Cow;

use crate::record::EnvironmentVariable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialVars {
    names: Vec<String>,
}

impl Default for SpecialVars {
    fn default() -> Self {
        Self::new(["PATH", "LD_LIBRARY_PATH"])
    }
}

impl SpecialVars {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Strip a leading `$NAME:` / `${NAME}:` (or a value that is only `$NAME`).
    pub fn clean<'a>(&self, ev: &'a EnvironmentVariable) -> Cow<'a, EnvironmentVariable> {
        if !self.contains(&ev.name) {
            return Cow::Borrowed(ev);
        }
        match strip_self_reference(&ev.name, &ev.value) {
            Some(rest) => Cow::Owned(EnvironmentVariable {
                value: rest.to_string(),
                ..ev.clone()
            }),
            None => Cow::Borrowed(ev),
        }
    }

    pub fn clean_all(&self, vars: Vec<EnvironmentVariable>) -> Vec<EnvironmentVariable> {
        vars.into_iter()
            .map(|mut ev| {
                if self.contains(&ev.name)
                    && let Some(rest) = strip_self_reference(&ev.name, &ev.value)
                {
                    ev.value = rest.to_string();
                }
                ev
            })
            .collect()
    }

    /// Value to write in shell text, with `$NAME:` put back in front.
    /// An empty value becomes `$NAME` alone; a trailing `:` would add the
    /// current directory to the search path.
    pub fn restore<'a>(&self, ev: &'a EnvironmentVariable) -> Cow<'a, str> {
        if !self.contains(&ev.name) {
            Cow::Borrowed(&ev.value)
        } else if ev.value.is_empty() {
            Cow::Owned(format!("${}", ev.name))
        } else {
            Cow::Owned(format!("${}:{}", ev.name, ev.value))
        }
    }
}

fn strip_self_reference<'v>(name: &str, value: &'v str) -> Option<&'v str> {
    for sigil in [format!("${name}"), format!("${{{name}}}")] {
        let Some(rest) = value.strip_prefix(sigil.as_str()) else {
            continue;
        };
        if rest.is_empty() {
            return Some(rest);
        }
        if let Some(rest) = rest.strip_prefix(':') {
            return Some(rest);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(name: &str, value: &str) -> EnvironmentVariable {
        EnvironmentVariable::new(name, value)
    }

    #[test]
    fn clean_strips_prefix() {
        let sv = SpecialVars::default();
        let path = ev("PATH", "$PATH:$PROGRAM_PATH/asdf/bin");
        assert_eq!(sv.clean(&path).value, "$PROGRAM_PATH/asdf/bin");

        let ld = ev("LD_LIBRARY_PATH", "${LD_LIBRARY_PATH}:/opt/lib");
        assert_eq!(sv.clean(&ld).value, "/opt/lib");

        assert_eq!(sv.clean(&ev("PATH", "$PATH")).value, "");
    }

    #[test]
    fn bare_self_reference_restores_unchanged() {
        let sv = SpecialVars::default();
        let cleaned = sv.clean_all(vec![
            ev("PATH", "$PATH"),
            ev("LD_LIBRARY_PATH", "${LD_LIBRARY_PATH}"),
        ]);
        assert_eq!(cleaned[0].value, "");
        assert_eq!(cleaned[1].value, "");
        assert_eq!(sv.restore(&cleaned[0]), "$PATH");
        assert_eq!(sv.restore(&cleaned[1]), "$LD_LIBRARY_PATH");
    }

    #[test]
    fn clean_all_moves_unchanged_records() {
        let sv = SpecialVars::default();
        let out = sv.clean_all(vec![
            ev("PATH", "$PATH:/opt/bin"),
            ev("HOME", "/root"),
            ev("LD_LIBRARY_PATH", "/usr/lib"),
        ]);
        let values: Vec<&str> = out.iter().map(|ev| ev.value.as_str()).collect();
        assert_eq!(values, ["/opt/bin", "/root", "/usr/lib"]);
    }

    #[test]
    fn clean_ignores_lookalikes() {
        let sv = SpecialVars::default();
        let extra = ev("PATH", "$PATH_EXTRA:/bin");
        assert!(matches!(sv.clean(&extra), Cow::Borrowed(_)));

        let trailing = ev("PATH", "/bin:$PATH");
        assert!(matches!(sv.clean(&trailing), Cow::Borrowed(_)));

        let other = ev("MANPATH", "$MANPATH:/usr/man");
        assert!(matches!(sv.clean(&other), Cow::Borrowed(_)));
    }

    #[test]
    fn restore_prepends() {
        let sv = SpecialVars::default();
        assert_eq!(sv.restore(&ev("PATH", "/opt/bin")), "$PATH:/opt/bin");
        assert_eq!(sv.restore(&ev("HOME", "/root")), "/root");
    }

    #[test]
    fn configured_names() {
        let sv = SpecialVars::new(["MANPATH"]);
        assert!(sv.contains("MANPATH"));
        assert!(!sv.contains("PATH"));
        assert_eq!(sv.clean(&ev("MANPATH", "$MANPATH:/x")).value, "/x");
    }

    #[test]
    fn clean_then_restore() {
        let sv = SpecialVars::default();
        let path = ev("PATH", "$PATH:/opt/bin");
        let cleaned = sv.clean(&path).into_owned();
        assert_eq!(sv.restore(&cleaned), "$PATH:/opt/bin");
    }
}
