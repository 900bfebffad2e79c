use {
    crate::source::ProcSource,
    std::io::{self, BufRead, BufReader},
    thiserror::Error,
};

/// the display label of the process currently consuming the most cpu.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopProcess {
    pub label: String,
}

#[derive(Debug, Error)]
pub enum TopProcessError {
    #[error("process listing failed: {0}")]
    Io(#[from] io::Error),
    #[error("process listing produced no rows")]
    NoRows,
    #[error("malformed process row: {row:?}")]
    Row { row: String },
}

// === impl TopProcess ===

impl TopProcess {
    /// how much of the command may be shown before it is cut short.
    pub const MAX_LABEL_LEN: usize = 28;

    /// appended when the command is cut short.
    const ELLIPSIS: &str = "...";

    /// a vendor namespace too noisy to display; removed from commands.
    const FILTER_PATTERN: &str = "org.gnome.";

    /// reads the source's first data row and derives a label from it.
    ///
    /// the listing is sorted descending by cpu usage, so the first row past
    /// the header is the busiest process.
    pub fn read(procs: &impl ProcSource) -> Result<Self, TopProcessError> {
        let reader = procs.open()?;
        let mut lines = BufReader::new(reader).lines();

        let _header = lines.next().transpose()?;
        let row = lines.next().transpose()?.ok_or(TopProcessError::NoRows)?;

        Self::from_row(&row)
    }

    /// derives a label from a `pid pcpu comm` row.
    fn from_row(row: &str) -> Result<Self, TopProcessError> {
        Self::command_column(row)
            .map(Self::label_of)
            .map(|label| Self { label })
            .ok_or_else(|| TopProcessError::Row {
                row: row.to_owned(),
            })
    }

    /// the command column: everything after the pid and pcpu columns.
    fn command_column(row: &str) -> Option<&str> {
        fn skip(rest: &str) -> Option<&str> {
            rest.trim_start()
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest)
        }

        skip(row).and_then(skip).map(str::trim)
    }

    /// filters and truncates a command into a display label.
    fn label_of(command: &str) -> String {
        let command = Self::strip_vendor(command);

        match command.char_indices().nth(Self::MAX_LABEL_LEN) {
            // short enough to show whole.
            None => command,
            // cut at the display limit and mark the cut.
            Some((at, _)) => {
                let mut label = command;
                label.truncate(at);
                label.push_str(Self::ELLIPSIS);
                label
            }
        }
    }

    /// removes the first occurrence of the vendor namespace prefix.
    fn strip_vendor(command: &str) -> String {
        let mut command = command.to_owned();
        if let Some(at) = command.find(Self::FILTER_PATTERN) {
            command.replace_range(at..at + Self::FILTER_PATTERN.len(), "");
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::source::MockPsCommand, indoc::indoc};

    const LISTING: &str = indoc! {"
            PID %CPU COMMAND
            312 42.0 firefox
            299 12.5 gnome-shell
              1  0.0 systemd
    "};

    #[test]
    fn reads_the_first_data_row() {
        let procs = MockPsCommand::new([Ok(LISTING.to_owned())]);
        let top = TopProcess::read(&procs).unwrap();
        assert_eq!(top.label, "firefox");
    }

    #[test]
    fn header_only_listing_has_no_rows() {
        let procs = MockPsCommand::new([Ok("  PID %CPU COMMAND\n".to_owned())]);
        let err = TopProcess::read(&procs).unwrap_err();
        assert!(matches!(err, TopProcessError::NoRows));
    }

    #[test]
    fn failure_to_start_surfaces_as_io() {
        let procs = MockPsCommand::new([Err(io::Error::from(io::ErrorKind::NotFound))]);
        let err = TopProcess::read(&procs).unwrap_err();
        assert!(matches!(err, TopProcessError::Io(_)));
    }

    #[test]
    fn commands_may_contain_spaces() {
        let top = TopProcess::from_row("  412 33.1 Web Content").unwrap();
        assert_eq!(top.label, "Web Content");
    }

    #[test]
    fn short_commands_pass_through() {
        let label = TopProcess::label_of("alacritty");
        assert_eq!(label, "alacritty");
    }

    #[test]
    fn commands_at_the_limit_pass_through() {
        let command = "a".repeat(TopProcess::MAX_LABEL_LEN);
        assert_eq!(TopProcess::label_of(&command), command);
    }

    #[test]
    fn long_commands_are_cut_and_marked() {
        let command = "a".repeat(TopProcess::MAX_LABEL_LEN + 1);
        let label = TopProcess::label_of(&command);

        assert_eq!(label.len(), TopProcess::MAX_LABEL_LEN + 3);
        assert_eq!(label, format!("{}...", "a".repeat(28)));
    }

    #[test]
    fn vendor_prefix_is_removed() {
        assert_eq!(TopProcess::label_of("org.gnome.Nautilus"), "Nautilus");
    }

    #[test]
    fn vendor_prefix_is_removed_at_its_position() {
        assert_eq!(
            TopProcess::label_of("flatpak run org.gnome.Maps"),
            "flatpak run Maps",
        );
    }

    #[test]
    fn unrelated_commands_are_not_filtered() {
        assert_eq!(TopProcess::label_of("gnome-shell"), "gnome-shell");
    }

    /// truncation applies to what remains after the vendor prefix is removed.
    #[test]
    fn filtering_happens_before_truncation() {
        let command = format!("org.gnome.{}", "b".repeat(30));
        let label = TopProcess::label_of(&command);
        assert_eq!(label, format!("{}...", "b".repeat(28)));
    }
}
