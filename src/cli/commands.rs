use clap::{Parser, Subcommand};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// Credit report risk analysis and loan decisions backed by a language model
#[derive(Parser, Debug)]
#[command(
    name = "creditlens",
    about = "Credit report risk analysis and loan decisions backed by a language model",
    version,
    author,
    long_about = "creditlens reads a credit report, asks a language model for a structured risk \
                  assessment and then for a loan decision, and writes both as a text report \
                  and a JSON record. It supports the providers available through genai \
                  (OpenAI, Anthropic, Ollama, Gemini, xAI, Groq)."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Assess a credit report and write the reports",
        long_about = "Finds or reads the credit report, runs the risk analysis and loan decision \
                      stages, and writes credit_report_langgraph_<timestamp>.txt/.json into the \
                      output directory.\n\n\
                      Examples:\n  \
                      creditlens assess\n  \
                      creditlens assess --input input/report.txt\n  \
                      creditlens assess --backend anthropic --model claude-3-5-sonnet-latest\n  \
                      creditlens assess --output-dir /tmp/reports --timeout 300"
    )]
    Assess(AssessArgs),

    #[command(
        about = "Print the text report for a saved JSON result",
        long_about = "Re-renders the combined text report from a credit_report_langgraph_*.json \
                      file without calling a model.\n\n\
                      Examples:\n  \
                      creditlens render output/credit_report_langgraph_20240101120000.json"
    )]
    Render(RenderArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AssessArgs {
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        help = "Credit report to assess (by default the first .txt/.md file in ./ or ./input)"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory for written reports [env: CREDITLENS_OUTPUT_DIR]"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "DIR",
        help = "Directory holding config.yaml, agents.yaml and tasks.yaml [env: CREDITLENS_CONFIG_DIR]"
    )]
    pub config_dir: Option<PathBuf>,

    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "Model provider [env: CREDITLENS_PROVIDER]"
    )]
    pub backend: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name (provider-specific, e.g. 'gpt-4o') [env: CREDITLENS_MODEL]"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Timeout for each model call [env: CREDITLENS_REQUEST_TIMEOUT]"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Append every prompt/response pair to this JSONL file [env: CREDITLENS_EXCHANGE_LOG]"
    )]
    pub exchange_log: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "JSON", help = "Combined JSON result written by `assess`")]
    pub path: PathBuf,
}

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    crate::config::parse_provider(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_assess_args() {
        let args = CliArgs::parse_from(["creditlens", "assess"]);
        match args.command {
            Commands::Assess(assess_args) => {
                assert!(assess_args.input.is_none());
                assert!(assess_args.output_dir.is_none());
                assert!(assess_args.config_dir.is_none());
                assert!(assess_args.backend.is_none());
                assert!(assess_args.model.is_none());
                assert!(assess_args.timeout.is_none());
                assert!(assess_args.exchange_log.is_none());
            }
            _ => panic!("Expected Assess command"),
        }
    }

    #[test]
    fn test_assess_with_options() {
        let args = CliArgs::parse_from([
            "creditlens",
            "assess",
            "--input",
            "input/report.txt",
            "--output-dir",
            "/tmp/out",
            "--config-dir",
            "/etc/creditlens",
            "--backend",
            "ollama",
            "--model",
            "llama3.1:8b",
            "--timeout",
            "300",
            "--exchange-log",
            "/tmp/exchanges.jsonl",
        ]);

        match args.command {
            Commands::Assess(assess_args) => {
                assert_eq!(assess_args.input, Some(PathBuf::from("input/report.txt")));
                assert_eq!(assess_args.output_dir, Some(PathBuf::from("/tmp/out")));
                assert_eq!(
                    assess_args.config_dir,
                    Some(PathBuf::from("/etc/creditlens"))
                );
                assert_eq!(assess_args.backend, Some(AdapterKind::Ollama));
                assert_eq!(assess_args.model, Some("llama3.1:8b".to_string()));
                assert_eq!(assess_args.timeout, Some(300));
                assert_eq!(
                    assess_args.exchange_log,
                    Some(PathBuf::from("/tmp/exchanges.jsonl"))
                );
            }
            _ => panic!("Expected Assess command"),
        }
    }

    #[test]
    fn test_render_command() {
        let args = CliArgs::parse_from(["creditlens", "render", "out/result.json"]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.path, PathBuf::from("out/result.json"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_render_requires_path() {
        assert!(CliArgs::try_parse_from(["creditlens", "render"]).is_err());
    }

    #[test]
    fn test_invalid_backend_rejected() {
        assert!(CliArgs::try_parse_from(["creditlens", "assess", "--backend", "fax"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["creditlens", "-v", "assess"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["creditlens", "assess", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["creditlens", "--log-level", "debug", "assess"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["creditlens", "-v", "-q", "assess"]).is_err());
    }

    #[test]
    fn test_adapter_kind_parsing() {
        assert!(parse_adapter_kind("ollama").is_ok());
        assert!(parse_adapter_kind("openai").is_ok());
        assert!(parse_adapter_kind("anthropic").is_ok());
        assert!(parse_adapter_kind("gemini").is_ok());
        assert!(parse_adapter_kind("xai").is_ok());
        assert!(parse_adapter_kind("groq").is_ok());
        assert!(parse_adapter_kind("invalid").is_err());
    }
}
