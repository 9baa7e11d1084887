//! Printed wording for every document, per locale.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::period::FilterPeriod;
use crate::types::PaymentMethod;

/// Language of generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Parses `fr` / `en`, case-insensitive.
    pub fn parse(value: &str) -> Option<Locale> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fr" => Some(Locale::Fr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::Fr => &FRENCH,
            Locale::En => &ENGLISH,
        }
    }
}

/// Static strings printed on documents.
#[derive(Debug)]
pub struct Labels {
    pub sales_title: &'static str,
    pub expenses_title: &'static str,
    pub balance_title: &'static str,
    pub invoice_title: &'static str,

    pub period: &'static str,
    pub generated_on: &'static str,

    pub date: &'static str,
    pub customer: &'static str,
    pub items: &'static str,
    pub payment: &'static str,
    pub amount: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub total: &'static str,

    pub revenue_section: &'static str,
    pub expenses_section: &'static str,
    pub revenue_subtotal: &'static str,
    pub expenses_subtotal: &'static str,
    pub net_profit: &'static str,

    pub invoice_number: &'static str,
    pub payment_method: &'static str,
    pub status: &'static str,
    pub paid: &'static str,
    pub unpaid: &'static str,
    pub article: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub line_total: &'static str,
    pub amount_due: &'static str,
    pub thank_you: &'static str,
    pub signature: &'static str,

    pub cash: &'static str,
    pub debt: &'static str,

    pub today: &'static str,
    pub this_week: &'static str,
    pub this_month: &'static str,
    pub this_quarter: &'static str,
}

static FRENCH: Labels = Labels {
    sales_title: "Rapport des ventes",
    expenses_title: "Rapport des charges",
    balance_title: "Bilan financier",
    invoice_title: "Facture",
    period: "Période",
    generated_on: "Date de génération",
    date: "Date",
    customer: "Client",
    items: "Articles",
    payment: "Paiement",
    amount: "Montant",
    description: "Description",
    category: "Catégorie",
    total: "TOTAL",
    revenue_section: "Recettes",
    expenses_section: "Charges",
    revenue_subtotal: "Sous-total recettes",
    expenses_subtotal: "Sous-total charges",
    net_profit: "Bénéfice net",
    invoice_number: "Facture N°",
    payment_method: "Mode de paiement",
    status: "Statut",
    paid: "PAYÉ",
    unpaid: "NON PAYÉ",
    article: "Article",
    quantity: "Quantité",
    unit_price: "Prix unitaire",
    line_total: "Total",
    amount_due: "Total à payer",
    thank_you: "Merci pour votre achat !",
    signature: "Gestion des ventes",
    cash: "Espèces",
    debt: "Dette",
    today: "Aujourd'hui",
    this_week: "Cette semaine",
    this_month: "Ce mois",
    this_quarter: "Ce trimestre",
};

static ENGLISH: Labels = Labels {
    sales_title: "Sales report",
    expenses_title: "Expenses report",
    balance_title: "Financial balance",
    invoice_title: "Invoice",
    period: "Period",
    generated_on: "Generated on",
    date: "Date",
    customer: "Customer",
    items: "Items",
    payment: "Payment",
    amount: "Amount",
    description: "Description",
    category: "Category",
    total: "TOTAL",
    revenue_section: "Revenue",
    expenses_section: "Expenses",
    revenue_subtotal: "Revenue subtotal",
    expenses_subtotal: "Expenses subtotal",
    net_profit: "Net profit",
    invoice_number: "Invoice No.",
    payment_method: "Payment method",
    status: "Status",
    paid: "PAID",
    unpaid: "UNPAID",
    article: "Item",
    quantity: "Quantity",
    unit_price: "Unit price",
    line_total: "Total",
    amount_due: "Total due",
    thank_you: "Thank you for your purchase!",
    signature: "Sales management",
    cash: "Cash",
    debt: "Debt",
    today: "Today",
    this_week: "This week",
    this_month: "This month",
    this_quarter: "This quarter",
};

impl Labels {
    /// Human label of a period. Empty for the unfiltered report.
    pub fn period_label(&self, period: Option<FilterPeriod>) -> &'static str {
        match period {
            Some(FilterPeriod::Day) => self.today,
            Some(FilterPeriod::Week) => self.this_week,
            Some(FilterPeriod::Month) => self.this_month,
            Some(FilterPeriod::Quarter) => self.this_quarter,
            None => "",
        }
    }

    /// Printed name of a payment method. Unknown methods print their raw value.
    pub fn payment_label<'a>(&self, method: &'a PaymentMethod) -> &'a str {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Wave => "Wave",
            PaymentMethod::Orange => "Orange Money",
            PaymentMethod::Debt => self.debt,
            PaymentMethod::Other(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_labels() {
        let fr = Locale::Fr.labels();
        assert_eq!(fr.payment_label(&PaymentMethod::Cash), "Espèces");
        assert_eq!(fr.payment_label(&PaymentMethod::Orange), "Orange Money");
        assert_eq!(fr.payment_label(&PaymentMethod::Debt), "Dette");
        assert_eq!(
            fr.payment_label(&PaymentMethod::Other("cheque".to_string())),
            "cheque"
        );

        let en = Locale::En.labels();
        assert_eq!(en.payment_label(&PaymentMethod::Cash), "Cash");
        assert_eq!(en.payment_label(&PaymentMethod::Wave), "Wave");
    }

    #[test]
    fn test_period_labels() {
        let fr = Locale::Fr.labels();
        assert_eq!(fr.period_label(Some(FilterPeriod::Day)), "Aujourd'hui");
        assert_eq!(fr.period_label(None), "");
        assert_eq!(Locale::En.labels().period_label(Some(FilterPeriod::Quarter)), "This quarter");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::default(), Locale::Fr);
    }
}
