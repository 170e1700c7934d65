//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::models::{
    Application, Channel, DeviceDetails, FlushReport, InboundSubscription, NetworkDetails,
    NetworkLocation, OutboundSms, OutboundSubscription, PingReport,
};
use crate::workflow::{Provisioned, ResetReport};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl PrettyPrint for DeviceDetails {
    fn pretty_print(&self) -> String {
        let mut lines = header("Device".to_string());

        if let Some(ref profile) = self.device_profile_id {
            lines.push(format!("Profile:        {}", profile));
        }

        if let Some(ids) = self.identifiers() {
            if let Some(ref iccid) = ids.iccid {
                lines.push(format!("ICCID:          {}", iccid));
            }
            if let Some(ref imsi) = ids.imsi {
                lines.push(format!("IMSI:           {}", imsi));
            }
            if let Some(ref msisdn) = ids.msisdn {
                lines.push(format!("MSISDN:         {}", msisdn));
            }
        }

        if let Some(attrs) = self.device_attributes.first() {
            if let Some(ref status) = attrs.device_status {
                lines.push(format!("Status:         {}", status));
            }
            if let Some(ref technology) = attrs.technology {
                lines.push(format!("Technology:     {}", technology));
            }
            if let Some(ref rate_plan) = attrs.rate_plan {
                lines.push(format!("Rate Plan:      {}", rate_plan));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for NetworkDetails {
    fn pretty_print(&self) -> String {
        let mut lines = header("Network".to_string());

        match self.is_registered() {
            Some(registered) => lines.push(format!("Registered:     {}", yes_no(registered))),
            None => lines.push("Registered:     unknown".to_string()),
        }
        lines.push(format!("Records:        {}", self.network_response.len()));

        lines.join("\n")
    }
}

impl PrettyPrint for Application {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Application: {}", self.application_short_name));

        lines.push(format!("ID:             {}", self.id().unwrap_or("-")));

        if let Some(ref name) = self.application_name {
            lines.push(format!("Name:           {}", name));
        }
        if let Some(ref tag) = self.application_tag {
            lines.push(format!("Tag:            {}", tag));
        }
        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }
        if self.api_key.is_some() {
            lines.push("API Key:        (set)".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Channel {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Channel: {}", self.application_tag));

        lines.push(format!("ID:             {}", self.id().unwrap_or("-")));

        if let Some(ref channel_type) = self.channel_type {
            lines.push(format!("Type:           {}", channel_type));
        }
        if let Some(url) = self.channel_url() {
            lines.push(format!("Long-poll URL:  {}", url));
        }
        if let Some(ref callback) = self.callback_url {
            lines.push(format!("Callback URL:   {}", callback));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for OutboundSubscription {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Subscription: {}", self.id().unwrap_or("-")));

        if !self.destination_address.is_empty() {
            lines.push(format!(
                "Destination:    {}",
                self.destination_address.join(", ")
            ));
        }
        if let Some(ref filter) = self.filter_criteria {
            lines.push(format!("Filter:         {}", filter));
        }
        if let Some(ref callback) = self.callback_reference {
            lines.push(format!("Notify URL:     {}", callback.notify_url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for InboundSubscription {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Inbound subscription: {}", self.id().unwrap_or("-")));

        lines.push(format!(
            "Destination:    {}",
            self.destination_address.join(", ")
        ));
        if let Some(ref criteria) = self.criteria {
            lines.push(format!("Criteria:       {}", criteria));
        }
        if let Some(ref callback) = self.callback_reference {
            lines.push(format!("Notify URL:     {}", callback.notify_url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for OutboundSms {
    fn pretty_print(&self) -> String {
        let mut lines = header("SMS sent".to_string());

        lines.push(format!("To:             {}", self.address.join(", ")));
        lines.push(format!("From:           {}", self.sender_address));
        lines.push(format!(
            "Message:        {}",
            self.outbound_sms_text_message.message
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for NetworkLocation {
    fn pretty_print(&self) -> String {
        let mut lines = header("Location".to_string());

        let fields = [
            ("MCC:            ", &self.mcc),
            ("MNC:            ", &self.mnc),
            ("LAC:            ", &self.lac),
            ("Cell ID:        ", &self.cell_id),
            ("Timestamp:      ", &self.location_timestamp),
        ];
        if let Some(ref kind) = self.response_type {
            lines.push(format!("Type:           {}", kind));
        }
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{label}{value}"));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PingReport {
    fn pretty_print(&self) -> String {
        let verdict = if self.alive { "alive" } else { "UNEXPECTED" };
        format!(
            "{:<18} {:<10} {} {}",
            self.service.to_string(),
            verdict,
            self.status,
            self.endpoint
        )
    }
}

impl PrettyPrint for FlushReport {
    fn pretty_print(&self) -> String {
        let mut lines: Vec<String> = self
            .polls
            .iter()
            .enumerate()
            .map(|(i, poll)| {
                format!(
                    "Poll {}: {} delivery receipts, {} inbound messages",
                    i + 1,
                    poll.delivery_receipts,
                    poll.inbound_messages
                )
            })
            .collect();

        if self.drained {
            lines.push("No pending notifications".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Provisioned {
    fn pretty_print(&self) -> String {
        [
            self.application.pretty_print(),
            self.channel.pretty_print(),
            self.subscription.pretty_print(),
        ]
        .join("\n\n")
    }
}

impl PrettyPrint for ResetReport {
    fn pretty_print(&self) -> String {
        let mut lines = header("Reset".to_string());
        lines.push(format!("Subscription:   {}", deleted(self.subscription)));
        lines.push(format!("Channel:        {}", deleted(self.channel)));
        lines.push(format!("Application:    {}", deleted(self.application)));
        lines.join("\n")
    }
}

fn deleted(value: bool) -> &'static str {
    if value {
        "deleted"
    } else {
        "not found"
    }
}
