//! Conversation prompts, option grids, and canned texts.
//!
//! Every message the guided flow can say lives here, so wording changes in
//! one place. Keyboards are plain label grids; the transport layer maps them
//! to its own markup types.

use serde::{Deserialize, Serialize};

use crate::category::CATEGORY_MENU;
use crate::price::display_price;
use crate::query::{SKIP_MANUFACTURER, SKIP_MODEL, SKIP_PROCESSOR, SKIP_RAM, SKIP_STORAGE};
use crate::tracking::TrackingRecord;

/// A reply keyboard grid, row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    pub fn from_grid(grid: &[&[&str]]) -> Self {
        Self {
            rows: grid
                .iter()
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
        }
    }
}

/// One outgoing chat message, optionally with a reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<ReplyKeyboard>,
    /// Send with Markdown formatting enabled.
    pub markdown: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            markdown: true,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, grid: &[&[&str]]) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(ReplyKeyboard::from_grid(grid)),
            markdown: false,
        }
    }
}

pub const MOBILE_MODEL_GRID: &[&[&str]] = &[
    &["Pro Max", "Pro", "Ultra"],
    &["Plus", "Max", "Mini"],
    &["5G", "Fold", "Flip"],
    &["Note", "Edge", "FE"],
    &["Gaming", "Lite", "SE"],
    &[SKIP_MODEL],
];

pub const MOBILE_STORAGE_GRID: &[&[&str]] = &[
    &["32 GB", "64 GB", "128 GB"],
    &["256 GB", "512 GB", "1 TB"],
    &[SKIP_STORAGE],
];

pub const LAPTOP_RAM_GRID: &[&[&str]] = &[
    &["8 GB", "12 GB", "16 GB"],
    &["32 GB", "64 GB", "128 GB"],
    &[SKIP_RAM],
];

pub const LAPTOP_STORAGE_GRID: &[&[&str]] = &[
    &["128 GB SSD", "256 GB SSD", "512 GB SSD"],
    &["1 TB SSD", "2 TB SSD", "4 TB SSD"],
    &["500 GB HDD", "1 TB HDD", "2 TB HDD"],
    &["256 GB SSD + 1 TB HDD", "512 GB SSD + 1 TB HDD"],
    &[SKIP_STORAGE],
];

pub const LAPTOP_PROCESSOR_GRID: &[&[&str]] = &[
    &["Intel Celeron", "Intel Pentium"],
    &["Intel Core i3", "Intel Core i5"],
    &["Intel Core i7", "Intel Core i9"],
    &["AMD Athlon", "AMD A-Series"],
    &["AMD Ryzen 3", "AMD Ryzen 5"],
    &["AMD Ryzen 7", "AMD Ryzen 9"],
    &["Apple M1", "Apple M2", "Apple M3"],
    &[SKIP_PROCESSOR],
];

const SKIP_MANUFACTURER_GRID: &[&[&str]] = &[&[SKIP_MANUFACTURER]];

pub fn category_prompt() -> Reply {
    Reply::with_keyboard(
        "🎯 Let's set up tracking!\n\n\
         First, please choose the category of the product you want to track:",
        CATEGORY_MENU,
    )
}

pub fn unknown_category_prompt() -> Reply {
    Reply::with_keyboard(
        "❌ That category isn't recognized.\n\
         Please choose from the list of available categories below or type /cancel to exit.",
        CATEGORY_MENU,
    )
}

pub fn mobile_name_prompt() -> Reply {
    Reply::plain(
        "📱 Got it! Now please enter the exact name or series of the phone you'd like to track.\n\
         For example: iPhone 14, Galaxy S23, Pixel 8 Pro",
    )
}

pub fn mobile_manufacturer_prompt() -> Reply {
    Reply::with_keyboard(
        "Please enter the name of the manufacturer\n(e.g., Samsung, Apple, Sony):",
        SKIP_MANUFACTURER_GRID,
    )
}

pub fn mobile_model_prompt() -> Reply {
    Reply::with_keyboard(
        "Choose a common model keyword to help narrow your search or enter the model that applies:",
        MOBILE_MODEL_GRID,
    )
}

pub fn mobile_storage_prompt() -> Reply {
    Reply::with_keyboard("Enter the storage capacity that applies:", MOBILE_STORAGE_GRID)
}

pub fn console_name_prompt() -> Reply {
    Reply::plain(
        "Awesome! 🎮 Now tell me which gaming console you're looking to track.\n\n\
         For example: PlayStation 5, Xbox Series X, Nintendo Switch OLED",
    )
}

pub fn console_manufacturer_prompt() -> Reply {
    Reply::with_keyboard(
        "Who is the manufacturer of the console you're looking for?\n(e.g., Sony, Microsoft, Nintendo):",
        SKIP_MANUFACTURER_GRID,
    )
}

pub fn laptop_manufacturer_prompt() -> Reply {
    Reply::with_keyboard(
        "Who is the manufacturer of the laptop you're looking for?\n(e.g., HP, Dell, Apple, Lenovo):",
        SKIP_MANUFACTURER_GRID,
    )
}

pub fn laptop_name_prompt() -> Reply {
    Reply::plain(
        "💻 Awesome! Now, please type the laptop name or series you want to track.\n\n\
         For example: Legion 7, MacBook Air, Dell XPS 15",
    )
}

pub fn laptop_ram_prompt() -> Reply {
    Reply::with_keyboard("How much RAM do you want?", LAPTOP_RAM_GRID)
}

pub fn laptop_storage_prompt() -> Reply {
    Reply::with_keyboard(
        "Please select the storage option that applies to your search:",
        LAPTOP_STORAGE_GRID,
    )
}

pub fn laptop_processor_prompt() -> Reply {
    Reply::with_keyboard(
        "Please choose a processor type that applies to your laptop search:",
        LAPTOP_PROCESSOR_GRID,
    )
}

pub fn headphones_manufacturer_prompt() -> Reply {
    Reply::plain(
        "Who makes the headphones you're looking for?\n(e.g., Sony, Bose, Apple, JBL, Beats)",
    )
}

pub fn headphones_model_prompt() -> Reply {
    Reply::plain(
        "Enter the headphone model you're looking for\n\
         (e.g., WH-1000XM5, AirPods Pro).\n\
         I'll try to match it with known models and offer suggestions if needed.",
    )
}

pub fn model_confident_prompt(model: &str) -> Reply {
    Reply::markdown(format!(
        "🔍 Did you mean: *{model}*?\n\nReply with 'yes' to confirm or type the correct model name."
    ))
}

pub fn model_proceed_ack(model: &str) -> Reply {
    Reply::markdown(format!("✅ Great! Proceeding with *{model}*."))
}

pub fn model_retype_prompt() -> Reply {
    Reply::plain("❌ Okay! Please type the correct model name you'd like to track.")
}

pub fn model_suggestions_prompt(suggestions: &[&str]) -> Reply {
    let bullets = suggestions
        .iter()
        .map(|s| format!("• {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    Reply::plain(format!(
        "❌ Couldn't confidently match your input.\n\
         Did you mean:\n{bullets}\n\n\
         Please type one of the options or try again."
    ))
}

pub fn invalid_price_prompt() -> Reply {
    Reply::plain("❌ Invalid price! Please enter a valid number:")
}

pub fn invalid_price_no_currency_prompt() -> Reply {
    Reply::plain("❌ Invalid price! Please enter a valid number (don't include $):")
}

pub fn searching_note() -> Reply {
    Reply::plain("🔍 Searching for the best match...")
}

pub fn no_results_prompt(product_name: &str) -> Reply {
    Reply::markdown(format!(
        "❌ No matching products found for *{product_name}*.\n\n\
         Please double-check the spelling, make sure it's a real product name, \
         and try again with more accurate details.\n\n\
         I can only search for *real products* that exist in the system.\n\n\
         Example: 'iPhone 14 Pro Max 256GB', not just 'iPhone 14'.\n\n\
         Let me know when you're ready to try again!"
    ))
}

pub fn idle_fallback_prompt() -> Reply {
    Reply::plain("Hmm, I'm not sure I understand.\n\nYou can try /help to see available commands")
}

pub fn greeting_prompt(first_name: &str) -> Reply {
    Reply::markdown(format!(
        "👋 Hey {first_name}, I'm *Dealhound*, your personal deal hunter!\n\
         I'll keep an eye out and alert you when your tracked product drops to your target price.\n\
         Let's find you the best deal 💸🔍"
    ))
}

pub fn greeting_follow_up_prompt() -> Reply {
    Reply::plain(
        "👉 To get started, type /track to begin tracking a product.\n\
         Need assistance? Type /help to see what I can do!",
    )
}

pub fn help_prompt() -> Reply {
    Reply::plain(
        "💡 Help Menu\n\n\
         Here are the main commands you can use:\n\n\
         • /track - Start tracking a new product 📦. I'll guide you step-by-step to set \
         your target price and notify you when I find a match!\n\n\
         • /list - View all the products you're currently tracking 🧾.\n\n\
         • /stop [product name] - Stop tracking a product from your list ❌\n   \
         Example: /stop iPhone 14 Pro Max\n\n\
         • /help - Show this help menu anytime you need it 🤖.\n\n\
         • /cancel - Cancel the current tracking setup process ⛔.",
    )
}

pub fn unknown_command_prompt() -> Reply {
    Reply::plain("❓ Sorry, I didn't recognize that command.\nType /help to see what I can do.")
}

pub fn cancel_ack_prompt() -> Reply {
    Reply::plain("❌ Cancelled current operation")
}

pub fn confirm_ack_prompt() -> Reply {
    Reply::plain("✅ Product confirmed and tracking started.")
}

pub fn stop_usage_prompt() -> Reply {
    Reply::plain("❌ Please specify a product to stop tracking")
}

pub fn stop_success_prompt(product_name: &str) -> Reply {
    Reply::plain(format!("✅ Stopped tracking {product_name}"))
}

pub fn stop_miss_prompt(product_name: &str) -> Reply {
    Reply::plain(format!("❌ Not tracking {product_name}"))
}

pub fn list_empty_prompt() -> Reply {
    Reply::plain("You're not tracking any products yet!")
}

pub fn tracking_list_prompt(records: &[TrackingRecord]) -> Reply {
    let lines = records
        .iter()
        .map(|record| {
            format!(
                "- {} (Target: {})",
                record.product_name,
                display_price(Some(record.target_price))
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    Reply::plain(format!("📋 Currently Tracking:\n{lines}"))
}
