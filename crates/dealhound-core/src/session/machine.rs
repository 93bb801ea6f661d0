//! The conversation transition machine.
//!
//! [`advance`] is a total, pure function over (stage, input text): every
//! stage has an outcome for every input, and nothing here touches the
//! transport or the catalog. Side effects come back to the caller as data:
//! the replies to send and, at the end of a flow, the search to run.

use rand::Rng;

use super::prompt::{self, Reply};
use super::stage::Stage;
use crate::category::Category;
use crate::matching::{resolve_model, Resolution};
use crate::price::parse_target_price;
use crate::query::{
    build_search_query, SearchQuery, SlotValue, SKIP_MANUFACTURER, SKIP_MODEL, SKIP_PROCESSOR,
    SKIP_RAM, SKIP_STORAGE,
};
use crate::responses;
use crate::tracking::ProductData;

/// A catalog search the application layer must run to finish a flow.
///
/// The machine stays on the price stage while the search runs; the outcome
/// (confirmation card or no-results reset) decides the real next stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub category: Category,
    pub query: SearchQuery,
    /// What the user called the product; becomes the tracking's display name.
    pub display_name: String,
    pub target_price: f64,
    pub product_data: ProductData,
}

/// The outcome of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub next: Stage,
    pub replies: Vec<Reply>,
    pub search: Option<SearchRequest>,
}

impl Step {
    fn reply(next: Stage, reply: Reply) -> Self {
        Self {
            next,
            replies: vec![reply],
            search: None,
        }
    }

    fn replies(next: Stage, replies: Vec<Reply>) -> Self {
        Self {
            next,
            replies,
            search: None,
        }
    }
}

/// Advances the flow by one incoming text message.
///
/// Commands (`/cancel`, `/track`, ...) are routed before this is called;
/// `advance` only sees plain conversation text.
pub fn advance<R: Rng + ?Sized>(rng: &mut R, stage: Stage, text: &str) -> Step {
    match stage {
        Stage::Idle => Step::reply(Stage::Idle, prompt::idle_fallback_prompt()),

        Stage::AwaitingCategory => category_chosen(rng, text),

        // Phone flow: name, manufacturer, model keyword, storage, price.
        Stage::AwaitingMobileName => Step::reply(
            Stage::AwaitingMobileManufacturer {
                name: text.trim().to_string(),
            },
            prompt::mobile_manufacturer_prompt(),
        ),
        Stage::AwaitingMobileManufacturer { name } => Step::reply(
            Stage::AwaitingMobileModel {
                name,
                manufacturer: SlotValue::from_input(text, SKIP_MANUFACTURER),
            },
            prompt::mobile_model_prompt(),
        ),
        Stage::AwaitingMobileModel { name, manufacturer } => Step::reply(
            Stage::AwaitingMobileStorage {
                name,
                manufacturer,
                model: SlotValue::from_input(text, SKIP_MODEL),
            },
            prompt::mobile_storage_prompt(),
        ),
        Stage::AwaitingMobileStorage {
            name,
            manufacturer,
            model,
        } => Step::reply(
            Stage::AwaitingMobilePrice {
                name,
                manufacturer,
                model,
                storage: SlotValue::from_input(text, SKIP_STORAGE),
            },
            Reply::plain(responses::target_price_prompt(rng, Category::Phones)),
        ),
        Stage::AwaitingMobilePrice {
            name,
            manufacturer,
            model,
            storage,
        } => match parse_target_price(text) {
            Err(_) => Step::reply(
                Stage::AwaitingMobilePrice {
                    name,
                    manufacturer,
                    model,
                    storage,
                },
                prompt::invalid_price_prompt(),
            ),
            Ok(target_price) => {
                let slots = [
                    manufacturer.clone(),
                    SlotValue::Given(name.clone()),
                    model.clone(),
                    storage.clone(),
                ];
                let product_data = ProductData {
                    manufacturer: manufacturer.clone().into_given(),
                    model_name: model.clone().into_given(),
                    storage: storage.clone().into_given(),
                    ..ProductData::default()
                };
                dispatch_search(
                    Category::Phones,
                    name.clone(),
                    &slots,
                    product_data,
                    target_price,
                    Stage::AwaitingMobilePrice {
                        name,
                        manufacturer,
                        model,
                        storage,
                    },
                )
            }
        },

        // Console flow: name, manufacturer, price.
        Stage::AwaitingConsoleName => Step::reply(
            Stage::AwaitingConsoleManufacturer {
                name: text.trim().to_string(),
            },
            prompt::console_manufacturer_prompt(),
        ),
        Stage::AwaitingConsoleManufacturer { name } => Step::reply(
            Stage::AwaitingConsolePrice {
                name,
                manufacturer: SlotValue::from_input(text, SKIP_MANUFACTURER),
            },
            Reply::plain(responses::target_price_prompt(rng, Category::Gaming)),
        ),
        Stage::AwaitingConsolePrice { name, manufacturer } => match parse_target_price(text) {
            Err(_) => Step::reply(
                Stage::AwaitingConsolePrice { name, manufacturer },
                prompt::invalid_price_prompt(),
            ),
            Ok(target_price) => {
                let slots = [manufacturer.clone(), SlotValue::Given(name.clone())];
                let product_data = ProductData {
                    manufacturer: manufacturer.clone().into_given(),
                    ..ProductData::default()
                };
                dispatch_search(
                    Category::Gaming,
                    name.clone(),
                    &slots,
                    product_data,
                    target_price,
                    Stage::AwaitingConsolePrice { name, manufacturer },
                )
            }
        },

        // Laptop flow: manufacturer, name, RAM, storage, processor, price.
        Stage::AwaitingLaptopManufacturer => Step::reply(
            Stage::AwaitingLaptopName {
                manufacturer: SlotValue::from_input(text, SKIP_MANUFACTURER),
            },
            prompt::laptop_name_prompt(),
        ),
        Stage::AwaitingLaptopName { manufacturer } => Step::reply(
            Stage::AwaitingLaptopRam {
                manufacturer,
                name: text.trim().to_string(),
            },
            prompt::laptop_ram_prompt(),
        ),
        Stage::AwaitingLaptopRam { manufacturer, name } => Step::reply(
            Stage::AwaitingLaptopStorage {
                manufacturer,
                name,
                ram: SlotValue::from_input(text, SKIP_RAM),
            },
            prompt::laptop_storage_prompt(),
        ),
        Stage::AwaitingLaptopStorage {
            manufacturer,
            name,
            ram,
        } => Step::reply(
            Stage::AwaitingLaptopProcessor {
                manufacturer,
                name,
                ram,
                storage: SlotValue::from_input(text, SKIP_STORAGE),
            },
            prompt::laptop_processor_prompt(),
        ),
        Stage::AwaitingLaptopProcessor {
            manufacturer,
            name,
            ram,
            storage,
        } => Step::reply(
            Stage::AwaitingLaptopPrice {
                manufacturer,
                name,
                ram,
                storage,
                processor: SlotValue::from_input(text, SKIP_PROCESSOR),
            },
            Reply::plain(responses::target_price_prompt(rng, Category::Laptops)),
        ),
        Stage::AwaitingLaptopPrice {
            manufacturer,
            name,
            ram,
            storage,
            processor,
        } => match parse_target_price(text) {
            Err(_) => Step::reply(
                Stage::AwaitingLaptopPrice {
                    manufacturer,
                    name,
                    ram,
                    storage,
                    processor,
                },
                prompt::invalid_price_prompt(),
            ),
            Ok(target_price) => {
                let slots = [
                    manufacturer.clone(),
                    SlotValue::Given(name.clone()),
                    processor.clone(),
                    ram.clone(),
                    storage.clone(),
                ];
                let product_data = ProductData {
                    manufacturer: manufacturer.clone().into_given(),
                    ram: ram.clone().into_given(),
                    storage: storage.clone().into_given(),
                    processor: processor.clone().into_given(),
                    ..ProductData::default()
                };
                dispatch_search(
                    Category::Laptops,
                    name.clone(),
                    &slots,
                    product_data,
                    target_price,
                    Stage::AwaitingLaptopPrice {
                        manufacturer,
                        name,
                        ram,
                        storage,
                        processor,
                    },
                )
            }
        },

        // Headphones flow: manufacturer, model (fuzzy), confirmation, price.
        Stage::AwaitingHeadphonesManufacturer => Step::reply(
            Stage::AwaitingHeadphonesModel {
                manufacturer: text.trim().to_string(),
            },
            prompt::headphones_model_prompt(),
        ),
        Stage::AwaitingHeadphonesModel { manufacturer } => match resolve_model(text) {
            Resolution::Confident { model, .. } => Step::reply(
                Stage::ConfirmHeadphonesModel {
                    manufacturer,
                    candidate: model.to_string(),
                },
                prompt::model_confident_prompt(model),
            ),
            Resolution::Suggestions(suggestions) => Step::reply(
                Stage::AwaitingHeadphonesModel { manufacturer },
                prompt::model_suggestions_prompt(&suggestions),
            ),
        },
        Stage::ConfirmHeadphonesModel {
            manufacturer,
            candidate,
        } => {
            if text.trim().eq_ignore_ascii_case("yes") {
                Step::replies(
                    Stage::AwaitingHeadphonesPrice {
                        manufacturer,
                        model: candidate.clone(),
                    },
                    vec![
                        prompt::model_proceed_ack(&candidate),
                        Reply::plain(responses::target_price_prompt(rng, Category::Headphones)),
                    ],
                )
            } else {
                Step::reply(
                    Stage::AwaitingHeadphonesModel { manufacturer },
                    prompt::model_retype_prompt(),
                )
            }
        }
        Stage::AwaitingHeadphonesPrice { manufacturer, model } => match parse_target_price(text) {
            Err(_) => Step::reply(
                Stage::AwaitingHeadphonesPrice { manufacturer, model },
                prompt::invalid_price_no_currency_prompt(),
            ),
            Ok(target_price) => {
                let slots = [
                    SlotValue::Given(manufacturer.clone()),
                    SlotValue::Given(model.clone()),
                ];
                let product_data = ProductData {
                    manufacturer: Some(manufacturer.clone()),
                    model_name: Some(model.clone()),
                    ..ProductData::default()
                };
                dispatch_search(
                    Category::Headphones,
                    model.clone(),
                    &slots,
                    product_data,
                    target_price,
                    Stage::AwaitingHeadphonesPrice { manufacturer, model },
                )
            }
        },

        // Text changes nothing while the card's buttons are pending.
        Stage::EndConversation { pending } => Step::reply(
            Stage::EndConversation { pending },
            prompt::idle_fallback_prompt(),
        ),
    }
}

fn category_chosen<R: Rng + ?Sized>(rng: &mut R, text: &str) -> Step {
    match Category::from_menu_label(text) {
        Some(Category::Phones) => {
            Step::reply(Stage::AwaitingMobileName, prompt::mobile_name_prompt())
        }
        Some(Category::Gaming) => {
            Step::reply(Stage::AwaitingConsoleName, prompt::console_name_prompt())
        }
        Some(Category::Laptops) => Step::reply(
            Stage::AwaitingLaptopManufacturer,
            prompt::laptop_manufacturer_prompt(),
        ),
        Some(Category::Headphones) => Step::reply(
            Stage::AwaitingHeadphonesManufacturer,
            prompt::headphones_manufacturer_prompt(),
        ),
        Some(unsupported) => Step::replies(
            Stage::AwaitingCategory,
            vec![
                Reply::plain(responses::unsupported_category_reply(rng, unsupported.label())),
                prompt::category_prompt(),
            ],
        ),
        None => Step::reply(Stage::AwaitingCategory, prompt::unknown_category_prompt()),
    }
}

/// Builds the query and either hands back a search to run or, when too few
/// slots survived, resets to the category question the same way an empty
/// search result does.
fn dispatch_search(
    category: Category,
    display_name: String,
    slots: &[SlotValue],
    product_data: ProductData,
    target_price: f64,
    retry: Stage,
) -> Step {
    match build_search_query(category, slots) {
        Err(_) => Step::replies(
            Stage::AwaitingCategory,
            vec![
                prompt::no_results_prompt(&display_name),
                prompt::category_prompt(),
            ],
        ),
        Ok(query) => Step {
            next: retry,
            replies: vec![prompt::searching_note()],
            search: Some(SearchRequest {
                category,
                query,
                display_name,
                target_price,
                product_data,
            }),
        },
    }
}
