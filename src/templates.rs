//! Canned response templates, one per category.
//!
//! Placeholders like `{name}` and `{agent_name}` are left verbatim.
//! Substitution happens wherever the reply actually gets sent; this
//! module only owns the texts and their category mapping.

use crate::pipeline::types::Category;

/// The canned response for a category.
///
/// Total by construction: every category has exactly one template.
pub fn response_template(category: Category) -> &'static str {
    match category {
        Category::Outage => OUTAGE,
        Category::BillingError => BILLING_ERROR,
        Category::LoginAccess => LOGIN_ACCESS,
        Category::Verification => VERIFICATION,
        Category::Pricing => PRICING,
        Category::ApiIntegration => API_INTEGRATION,
        Category::Refund => REFUND,
        Category::Other => OTHER,
    }
}

/// Render every template as one markdown document, in category
/// precedence order.
pub fn render_markdown() -> String {
    let mut out = String::from("# Response Templates\n\n");
    for category in Category::ALL {
        out.push_str(&format!(
            "## {}\n\n```\n{}\n```\n\n",
            category.label(),
            response_template(category)
        ));
    }
    out
}

const OUTAGE: &str = "\
Subject: We're on it — investigating your outage now

Hi {name},

Thanks for flagging the outage. Our team is actively investigating.
Incident ID: {incident_id}.
We'll update you every {cadence} until resolved.

— {agent_name}
";

const BILLING_ERROR: &str = "\
Subject: Billing correction in progress

Hi {name},

Sorry about the duplicate charge. I've opened a billing ticket {ticket_id}.
Refund will be processed within {sla} business days.

— {agent_name}
";

const LOGIN_ACCESS: &str = "\
Subject: Help with login/access

Hi {name},

Sorry you're locked out. Use this reset link: {reset_link}.
If it fails, share the exact error and timestamp.

— {agent_name}
";

const VERIFICATION: &str = "\
Subject: Verification assistance

Hi {name},

I've re-sent the verification email to {email}.
If you don't receive it in {ttl} minutes, let me know.

— {agent_name}
";

const PRICING: &str = "\
Subject: Pricing tiers — detailed breakdown

Hi {name},

Here's the breakdown of tiers and billing cadence.
Would you like a 15-min walk-through?

— {agent_name}
";

const API_INTEGRATION: &str = "\
Subject: CRM/API integrations

Hi {name},

Yes — we support REST and OAuth integrations.
I've attached docs and a sample Postman collection.

— {agent_name}
";

const REFUND: &str = "\
Subject: Refund request — next steps

Hi {name},

I see your refund request from {request_date}. Ticket {ticket_id} is in progress.
Refunds complete within {sla} business days.

— {agent_name}
";

const OTHER: &str = "\
Subject: Thanks for reaching out

Hi {name},

Thanks for contacting us. Could you share more detail so I can route this to the right specialist?

— {agent_name}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_template() {
        for category in Category::ALL {
            let template = response_template(category);
            assert!(template.starts_with("Subject: "), "{category}");
            assert!(template.contains("{name}"), "{category}");
            assert!(template.contains("{agent_name}"), "{category}");
        }
    }

    #[test]
    fn category_specific_placeholders_present() {
        assert!(response_template(Category::Outage).contains("{incident_id}"));
        assert!(response_template(Category::BillingError).contains("{ticket_id}"));
        assert!(response_template(Category::BillingError).contains("{sla}"));
        assert!(response_template(Category::LoginAccess).contains("{reset_link}"));
        assert!(response_template(Category::Verification).contains("{email}"));
        assert!(response_template(Category::Refund).contains("{request_date}"));
    }

    #[test]
    fn markdown_lists_every_category_once() {
        let doc = render_markdown();
        assert!(doc.starts_with("# Response Templates\n"));
        for category in Category::ALL {
            let heading = format!("## {}", category.label());
            assert_eq!(doc.matches(&heading).count(), 1, "{category}");
        }
    }
}
