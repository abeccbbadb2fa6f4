use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use plistsplit::ExtractParams;

#[derive(Parser, Debug)]
#[command(
    name = "plistsplit",
    version,
    about = "Slice a texture-packer sprite sheet into individual sprite images",
    override_usage = "plistsplit -plist <FILE> [-outdir <DIR>] [-manifest] [-log]"
)]
pub struct CliArgs {
    /// Sprite sheet descriptor (.plist); the texture is located through its metadata
    #[arg(long = "plist", value_name = "FILE")]
    pub plist: PathBuf,

    /// Output directory (default: descriptor directory + descriptor base name)
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write manifest.json with frame geometry next to the sprites
    #[arg(long, default_value_t = false)]
    pub manifest: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    pub fn to_params(&self) -> ExtractParams {
        ExtractParams {
            plist: self.plist.clone(),
            output_dir: self.output_dir.clone(),
            manifest: self.manifest,
        }
    }
}

/// Rewrite the single-dash spellings (`-plist`, `-outdir`, ...) into clap's
/// long form and drop every token the tool does not know.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = Vec::new();
    if let Some(program) = args.next() {
        normalized.push(program);
    }

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        match text {
            "-plist" | "--plist" => {
                normalized.push("--plist".into());
                normalized.extend(args.next());
            }
            "-outdir" | "--outdir" | "-output-dir" | "--output-dir" | "-o" => {
                normalized.push("--output-dir".into());
                normalized.extend(args.next());
            }
            "-manifest" | "--manifest" => normalized.push("--manifest".into()),
            "-log" | "--log" => normalized.push("--log".into()),
            "-h" | "-help" | "--help" => normalized.push("--help".into()),
            "-V" | "-version" | "--version" => normalized.push("--version".into()),
            t if t.starts_with("--plist=") || t.starts_with("--output-dir=") => {
                normalized.push(t.into())
            }
            _ => {}
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let args = parse(&["plistsplit", "-plist", "ui/sheet.plist", "-outdir", "out", "-manifest"])
            .unwrap();
        assert_eq!(args.plist, PathBuf::from("ui/sheet.plist"));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.manifest);
        assert!(!args.log);
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let normalized = normalize_args(["plistsplit", "-fast", "stray", "-plist", "a.plist", "-q"]);
        assert_eq!(
            normalized,
            vec![
                OsString::from("plistsplit"),
                OsString::from("--plist"),
                OsString::from("a.plist"),
            ]
        );
    }

    #[test]
    fn missing_plist_is_a_usage_error() {
        let err = parse(&["plistsplit", "-outdir", "out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["plistsplit"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_flag_short_circuits() {
        let err = parse(&["plistsplit", "-h", "-plist", "a.plist"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn params_mirror_arguments() {
        let args = parse(&["plistsplit", "--plist=x.plist", "-log"]).unwrap();
        let params = args.to_params();
        assert_eq!(params, ExtractParams::new("x.plist"));
        assert!(args.log);
    }
}
