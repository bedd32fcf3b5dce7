//! Command-line flags and what they select.

use std::path::PathBuf;

use clap::Parser;
use txt_ingest::{
    Format, HeaderSpec, SplitDefaults, DEFAULT_FIELD_SEPARATOR, DEFAULT_LINE_PATTERN,
    DEFAULT_RECORD_SEPARATOR,
};
use txt_render::{RenderError, TemplateSet, INLINE_TEMPLATE_NAME};

#[derive(Parser, Debug)]
#[command(
    name = "txt",
    about = "Render templates against text, CSV or JSON read from stdin",
    version
)]
pub struct Cli {
    /// Template files, named by basename. The first is the main template
    /// unless --template names another
    #[arg(value_name = "TEMPLATE_FILE")]
    pub templates: Vec<PathBuf>,

    /// Record separator regex
    #[arg(short = 'R', long = "record-separator", value_name = "RE")]
    pub record_separator: Option<String>,

    /// Field separator regex
    #[arg(short = 'F', long = "field-separator", value_name = "RE")]
    pub field_separator: Option<String>,

    /// Capture each record's fields with this regex
    #[arg(short = 'L', long = "line-pattern", value_name = "RE")]
    pub line_pattern: Option<String>,

    /// Read stdin as CSV
    #[arg(long)]
    pub csv: bool,

    /// Comma-separated field names; empty takes them from the input.
    /// Implies --csv unless -L is given
    #[arg(long, value_name = "SPEC")]
    pub header: Option<String>,

    /// Read stdin as a JSON document
    #[arg(long, conflicts_with_all = ["csv", "header", "line_pattern", "no_stdin"])]
    pub json: bool,

    /// Do not read stdin
    #[arg(long = "no-stdin", conflicts_with_all = ["csv", "header", "line_pattern"])]
    pub no_stdin: bool,

    /// HTML-escape every interpolated value
    #[arg(long)]
    pub html: bool,

    /// Inline main template
    #[arg(short = 'e', long = "expr", value_name = "TEMPLATE")]
    pub expr: Option<String>,

    /// Name of the main template
    #[arg(short = 't', long = "template", value_name = "NAME", conflicts_with = "expr")]
    pub template: Option<String>,

    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Effective RS, FS and LP for this run.
    pub fn split_defaults(&self) -> SplitDefaults {
        SplitDefaults {
            record_separator: self
                .record_separator
                .clone()
                .unwrap_or_else(|| DEFAULT_RECORD_SEPARATOR.to_string()),
            field_separator: self
                .field_separator
                .clone()
                .unwrap_or_else(|| DEFAULT_FIELD_SEPARATOR.to_string()),
            line_pattern: self
                .line_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_LINE_PATTERN.to_string()),
        }
    }

    /// How stdin is read, or `None` when it is not read at all.
    ///
    /// Precedence: `--no-stdin`, `--json`, `-L`, `--csv`/`--header`, split.
    pub fn format(&self, defaults: &SplitDefaults) -> Option<Format> {
        if self.no_stdin {
            return None;
        }
        if self.json {
            return Some(Format::Json);
        }
        if self.line_pattern.is_some() {
            return Some(Format::Lines {
                rs: defaults.record_separator.clone(),
                lp: defaults.line_pattern.clone(),
                header: Some(self.header_spec()),
            });
        }
        if self.csv || self.header.is_some() {
            return Some(Format::Csv {
                header: self.header_spec(),
            });
        }
        Some(Format::Split {
            rs: defaults.record_separator.clone(),
            fs: defaults.field_separator.clone(),
            header: None,
        })
    }

    fn header_spec(&self) -> HeaderSpec {
        HeaderSpec::parse(self.header.as_deref().unwrap_or(""))
    }

    /// Collects `-e` and the template files, then picks the main template.
    pub fn template_set(&self) -> Result<TemplateSet, RenderError> {
        let mut set = TemplateSet::new();
        if let Some(expr) = &self.expr {
            set.add_inline(INLINE_TEMPLATE_NAME, expr.as_str());
        }
        for path in &self.templates {
            set.add_file(path)?;
        }
        if let Some(name) = &self.template {
            set.set_main(name)?;
        }
        set.main()?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("txt").chain(args.iter().copied())).unwrap()
    }

    fn format(args: &[&str]) -> Option<Format> {
        let cli = parse(args);
        cli.format(&cli.split_defaults())
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn split_is_the_default_mode() {
        assert_eq!(
            format(&["-e", "x"]),
            Some(Format::Split {
                rs: "\n".into(),
                fs: r"\s+".into(),
                header: None,
            })
        );
        assert_eq!(
            format(&["-e", "x", "-R", ";", "-F", ","]),
            Some(Format::Split {
                rs: ";".into(),
                fs: ",".into(),
                header: None,
            })
        );
    }

    #[test]
    fn header_implies_csv() {
        assert_eq!(
            format(&["-e", "x", "--header", "a,b"]),
            Some(Format::Csv {
                header: HeaderSpec::Names(vec!["a".into(), "b".into()]),
            })
        );
        assert_eq!(
            format(&["-e", "x", "--csv"]),
            Some(Format::Csv {
                header: HeaderSpec::FromInput,
            })
        );
    }

    #[test]
    fn line_pattern_beats_csv_header() {
        assert_eq!(
            format(&["-e", "x", "-L", r"(\w+)", "--header", "w"]),
            Some(Format::Lines {
                rs: "\n".into(),
                lp: r"(\w+)".into(),
                header: Some(HeaderSpec::Names(vec!["w".into()])),
            })
        );
        assert_eq!(
            format(&["-e", "x", "-L", r"(?P<w>\w+)"]),
            Some(Format::Lines {
                rs: "\n".into(),
                lp: r"(?P<w>\w+)".into(),
                header: Some(HeaderSpec::FromInput),
            })
        );
    }

    #[test]
    fn json_and_no_stdin() {
        assert_eq!(format(&["-e", "x", "--json"]), Some(Format::Json));
        assert_eq!(format(&["-e", "x", "--no-stdin"]), None);
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let cases: [&[&str]; 4] = [
            &["txt", "--json", "--csv"],
            &["txt", "--json", "--no-stdin"],
            &["txt", "--no-stdin", "-L", "x"],
            &["txt", "-e", "x", "-t", "main"],
        ];
        for args in cases {
            assert!(Cli::try_parse_from(args).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn a_template_is_required() {
        assert!(matches!(
            parse(&[]).template_set(),
            Err(RenderError::NoTemplate)
        ));
        let set = parse(&["-e", "{{ dot }}"]).template_set().unwrap();
        assert_eq!(set.main().unwrap(), INLINE_TEMPLATE_NAME);
    }
}
