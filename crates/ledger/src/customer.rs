use serde::{Deserialize, Serialize};

use bankledger_core::{CustomerId, DomainError, DomainResult, Entity};

/// Bank customer. Identity is the generated `id`; name and city may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    city: String,
}

impl Customer {
    pub fn new(name: impl AsRef<str>, city: impl AsRef<str>) -> DomainResult<Self> {
        Self::with_id(CustomerId::new(), name, city)
    }

    pub fn with_id(id: CustomerId, name: impl AsRef<str>, city: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: non_blank("name", name.as_ref())?,
            city: non_blank("city", city.as_ref())?,
        })
    }

    /// The id by value, for use as an account owner.
    pub fn customer_id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl AsRef<str>) -> DomainResult<()> {
        self.name = non_blank("name", name.as_ref())?;
        Ok(())
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: impl AsRef<str>) -> DomainResult<()> {
        self.city = non_blank("city", city.as_ref())?;
        Ok(())
    }

    /// First eight characters of the id, enough to tell customers apart in listings.
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }
}

fn non_blank(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("customer {field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Customer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}]: {} ({})", self.short_id(), self.name, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_cities_must_not_be_blank() {
        assert!(Customer::new("", "Leipzig").is_err());
        assert!(Customer::new("Ottokar Domma", "  ").is_err());

        let mut customer = Customer::new(" Ottokar Domma ", "Leipzig").unwrap();
        assert_eq!(customer.name(), "Ottokar Domma");
        assert!(customer.set_city("").is_err());
        assert_eq!(customer.city(), "Leipzig");
    }

    #[test]
    fn renaming_keeps_identity() {
        let mut customer = Customer::new("Lieselotte Scharfsinnig", "Hamburg").unwrap();
        let id = customer.customer_id();
        customer.set_name("Lieselotte Domma").unwrap();
        assert_eq!(customer.id(), &id);
        assert_eq!(
            customer.to_string(),
            format!("[{}]: Lieselotte Domma (Hamburg)", customer.short_id())
        );
    }
}
