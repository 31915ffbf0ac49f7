use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "squadron",
    version,
    about = "Fine-tune and score extractive QA models on SQuAD-style datasets"
)]
pub struct Cli {
    /// Language code selecting the dataset files and the output model name
    pub language: String,

    /// YAML config overlay; defaults apply for any unset field
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding squad_v2-<split>-<language>.jsonl files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory the score report (and exported weights) are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the model-fitting service
    #[arg(long, env = "SQUADRON_FITTER_URL", default_value = "http://127.0.0.1:8080")]
    pub fitter_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_required() {
        assert!(Cli::try_parse_from(["squadron"]).is_err());
        let cli = Cli::try_parse_from(["squadron", "da"]).unwrap();
        assert_eq!(cli.language, "da");
        assert_eq!(cli.fitter_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn overrides_are_parsed() {
        let cli = Cli::try_parse_from([
            "squadron",
            "da",
            "--config",
            "squadron.yaml",
            "--data-dir",
            "data",
            "--output-dir",
            "out",
            "--fitter-url",
            "http://fit.example:9000",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("squadron.yaml")));
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("data")));
        assert_eq!(cli.output_dir.as_deref(), Some(std::path::Path::new("out")));
        assert_eq!(cli.fitter_url, "http://fit.example:9000");
    }
}
