/// Generates the integration lookup and its listing from a single table.
macro_rules! define_services {
    ( $( $key:literal => $name:literal ),* $(,)? ) => {
        /// Canonical display name for a lower-cased integration key.
        pub fn canonical_name(key: &str) -> Option<&'static str> {
            match key {
                $( $key => Some($name), )*
                _ => None,
            }
        }

        /// Every `(key, display name)` pair, in declaration order.
        pub const KNOWN_SERVICES: &[(&str, &str)] = &[ $( ($key, $name), )* ];
    };
}

define_services! {
    // Generic trigger sources
    "webhook" => "Webhook",
    "httprequest" => "HTTP",
    "cron" => "Cron",

    // Communication
    "slack" => "Slack",
    "discord" => "Discord",
    "telegram" => "Telegram",
    "microsoftteams" => "Teams",
    "mattermost" => "Mattermost",
    "twitter" => "Twitter",

    // Email
    "gmail" => "Gmail",
    "sendgrid" => "SendGrid",
    "mailchimp" => "Mailchimp",

    // Storage and cloud
    "googlesheets" => "GoogleSheets",
    "googledrive" => "GoogleDrive",
    "googlecalendar" => "GoogleCalendar",
    "dropbox" => "Dropbox",
    "onedrive" => "OneDrive",
    "aws" => "AWS",
    "azure" => "Azure",
    "googlecloud" => "GCP",

    // Databases
    "postgresql" => "PostgreSQL",
    "mysql" => "MySQL",
    "mongodb" => "MongoDB",
    "redis" => "Redis",
    "elasticsearch" => "Elasticsearch",

    // CRM and project management
    "hubspot" => "HubSpot",
    "salesforce" => "Salesforce",
    "trello" => "Trello",
    "asana" => "Asana",
    "clickup" => "ClickUp",
    "notion" => "Notion",
    "airtable" => "Airtable",

    // Development
    "github" => "GitHub",

    // Commerce
    "stripe" => "Stripe",
    "shopify" => "Shopify",

    // AI
    "openai" => "OpenAI",
    "anthropic" => "Anthropic",
    "replicate" => "Replicate",

    // Forms and scheduling
    "typeform" => "Typeform",
    "calendly" => "Calendly",
    "zoom" => "Zoom",

    // Messaging transport
    "twilio" => "Twilio",
}

/// Control-flow and plumbing node kinds that never count as integrations.
pub const UTILITY_NODES: &[&str] = &[
    "Set",
    "Function",
    "If",
    "Switch",
    "Merge",
    "StickyNote",
    "NoOp",
    "Code",
    "Execute",
    "Split",
    "Wait",
    "Stop",
];
