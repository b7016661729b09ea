//! Conversion: EventResponse → Event (TryFrom + validation).

use rust_decimal::Decimal;

use super::wire;
use super::{
    Event, EventStatus, TicketType, TicketTypeValidationError, ValidationError, VenueSummary,
};
use crate::shared::{EventId, TicketTypeId, UserId};

impl TryFrom<wire::TicketTypeResponse> for TicketType {
    type Error = TicketTypeValidationError;

    fn try_from(source: wire::TicketTypeResponse) -> Result<Self, Self::Error> {
        let id = TicketTypeId::new(source.id);

        let name = match source.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(TicketTypeValidationError::MissingName(id)),
        };
        let price = source
            .price
            .ok_or(TicketTypeValidationError::MissingPrice(id))?;
        if price < Decimal::ZERO {
            return Err(TicketTypeValidationError::NegativePrice(id));
        }

        let total = source.total_quantity.unwrap_or(0);
        let available = source.quantity_available.unwrap_or(0);
        if total < 0 || available < 0 {
            return Err(TicketTypeValidationError::NegativeQuantity(id));
        }
        if available > total {
            return Err(TicketTypeValidationError::AvailableExceedsTotal {
                id,
                available,
                total,
            });
        }

        Ok(TicketType {
            id,
            event_id: EventId::new(source.event_id),
            name,
            price,
            total_quantity: total as u32,
            quantity_available: available as u32,
        })
    }
}

impl TryFrom<wire::EventResponse> for Event {
    type Error = ValidationError;

    fn try_from(source: wire::EventResponse) -> Result<Self, Self::Error> {
        let event_id = EventId::new(source.id);
        let mut errors: Vec<ValidationError> = Vec::new();

        let mut ticket_types = Vec::new();
        for tt in source.ticket_types.unwrap_or_default() {
            match tt.try_into() {
                Ok(validated) => ticket_types.push(validated),
                Err(err) => errors.push(ValidationError::TicketType(err)),
            }
        }

        let title = source.title.unwrap_or_else(|| {
            errors.push(ValidationError::MissingTitle);
            String::new()
        });
        let date = source.event_date.unwrap_or_else(|| {
            errors.push(ValidationError::MissingDate);
            chrono::NaiveDate::MIN
        });
        let status = match source.status.as_deref() {
            Some(raw) => EventStatus::from_str(raw).unwrap_or_else(|| {
                errors.push(ValidationError::InvalidStatus(raw.to_string()));
                EventStatus::Pending
            }),
            None => {
                errors.push(ValidationError::InvalidStatus("<absent>".to_string()));
                EventStatus::Pending
            }
        };

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(event_id, errors));
        }

        Ok(Event {
            id: event_id,
            title,
            description: source.description.unwrap_or_default(),
            category_id: source.category_id,
            category_name: source.category_name,
            venue: VenueSummary {
                id: source.venue_id,
                name: source.venue_name.unwrap_or_default(),
                address: source.venue_address,
                city: source.venue_city,
                capacity: source.venue_capacity.and_then(|c| u32::try_from(c).ok()),
                latitude: source.venue_latitude,
                longitude: source.venue_longitude,
            },
            date,
            time: source.event_time,
            image_url: source.image_url,
            organizer_id: source.organizer_id.map(UserId::new),
            organizer_name: source.organizer_name,
            status,
            ticket_types,
        })
    }
}
