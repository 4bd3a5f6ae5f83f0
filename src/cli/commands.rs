use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "medichat")]
#[command(author, version, about = "Medical symptom chat backed by a hosted completion API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat service
    Serve {
        /// Bind address (overrides the configured value)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Send a single message and print the guidance
    Chat {
        message: String,

        /// Response language (e.g. English, Kannada, Hindi)
        #[arg(short, long, default_value = "English")]
        language: String,

        /// User identity owning the conversation history
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Start an interactive chat session
    Interactive {
        /// Response language (e.g. English, Kannada, Hindi)
        #[arg(short, long, default_value = "English")]
        language: String,

        /// User identity owning the conversation history
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Print the persisted conversation history
    History {
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Delete the persisted conversation history
    Clear {
        #[arg(short, long, default_value = "local")]
        user: String,
    },
}
