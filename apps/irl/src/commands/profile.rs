//! `irl profile`: researcher identity injected into new plans.
//!
//! Templates may reference `{{name}}`, `{{title}}`, `{{institution}}`,
//! `{{department}}`, `{{email}}` and `{{instructions}}`.
//!
//! ## Usage
//!
//! ```bash
//! irl profile set --name "Ada Lovelace" --institution "Analytical Society"
//! irl profile set --title ""      # clears the title
//! irl profile show --json
//! irl profile clear
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::errors::IrlError;
use crate::settings::{ConfigStore, Profile};

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the stored profile.
    Show {
        /// Print JSON.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },

    /// Set profile fields. Fields not given are kept; an empty value clears one.
    Set(ProfileFields),

    /// Remove every profile field.
    Clear,
}

#[derive(Args)]
pub struct ProfileFields {
    #[clap(long)]
    pub name: Option<String>,
    /// Position, e.g. "PhD candidate".
    #[clap(long)]
    pub title: Option<String>,
    #[clap(long)]
    pub institution: Option<String>,
    #[clap(long)]
    pub department: Option<String>,
    #[clap(long)]
    pub email: Option<String>,
    /// Free-form notes added to every plan, e.g. reporting conventions.
    #[clap(long)]
    pub instructions: Option<String>,
}

impl ProfileFields {
    fn into_profile(self) -> Profile {
        Profile {
            name: self.name,
            title: self.title,
            institution: self.institution,
            department: self.department,
            email: self.email,
            instructions: self.instructions,
        }
    }
}

/// Executes the `profile` command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or `set`
/// is given no fields.
pub fn execute(args: ProfileArgs) -> Result<()> {
    let store = ConfigStore::open()?;

    match args.command {
        ProfileCommand::Show { json } => {
            let profile = store.profile()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else if profile.is_set() {
                for (key, value) in profile.fields() {
                    println!("  {key:<13} {}", value.unwrap_or("-"));
                }
            } else {
                println!("No profile set. Run 'irl profile set --name <NAME> ...'.");
            }
        }
        ProfileCommand::Set(fields) => {
            let update = fields.into_profile();
            if update.fields().iter().all(|(_, value)| value.is_none()) {
                return Err(IrlError::invalid_arguments(
                    "nothing to set. Pass at least one of --name, --title, --institution, \
                     --department, --email, --instructions",
                )
                .into());
            }
            let mut profile = store.profile()?;
            profile.merge(update);
            store.set_profile(profile)?;
            println!("Profile updated.");
        }
        ProfileCommand::Clear => {
            store.clear_profile()?;
            println!("Profile cleared.");
        }
    }

    Ok(())
}
