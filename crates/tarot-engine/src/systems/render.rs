use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance, TextInstance};

/// Build the render buffer from a set of entities.
///
/// Entities are ordered back-to-front by layer; within a layer spawn order
/// is kept. Sprites become `RenderInstance`s and labels become
/// `TextInstance`s, so an entity may contribute one of each.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut ordered: Vec<&Entity> = entities.filter(|e| e.active).collect();
    // Stable: spawn order survives within a layer.
    ordered.sort_by_key(|e| e.layer);

    for entity in ordered {
        if let Some(sprite) = &entity.sprite {
            buffer.push(RenderInstance {
                x: entity.pos.x,
                y: entity.pos.y,
                rotation: entity.rotation,
                width: entity.scale.x,
                height: entity.scale.y,
                texture: sprite.texture.0 as f32,
                alpha: sprite.alpha,
                layer: entity.layer.as_u8() as f32,
            });
        }

        if let Some(label) = &entity.label {
            if label.text.is_empty() {
                continue;
            }
            buffer.push_label(TextInstance {
                x: entity.pos.x,
                y: entity.pos.y,
                size: label.size,
                alpha: label.alpha,
                align: label.align,
                layer: entity.layer.as_u8(),
                text: label.text.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::label::LabelComponent;
    use crate::components::layer::RenderLayer;
    use crate::components::sprite::{SpriteComponent, TextureId};
    use glam::Vec2;

    #[test]
    fn sorts_back_to_front_keeping_spawn_order() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_layer(RenderLayer::Popup)
                .with_sprite(SpriteComponent::new(TextureId(9))),
            Entity::new(EntityId(2))
                .with_layer(RenderLayer::Background)
                .with_sprite(SpriteComponent::new(TextureId(1))),
            Entity::new(EntityId(3))
                .with_sprite(SpriteComponent::new(TextureId(5))),
            Entity::new(EntityId(4))
                .with_sprite(SpriteComponent::new(TextureId(6))),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        let textures: Vec<f32> = buffer.instances.iter().map(|i| i.texture).collect();
        assert_eq!(textures, vec![1.0, 5.0, 6.0, 9.0]);
    }

    #[test]
    fn labels_and_sprites_from_one_entity() {
        let entities = vec![Entity::new(EntityId(1))
            .with_pos(Vec2::new(640.0, 100.0))
            .with_scale(Vec2::new(350.0, 150.0))
            .with_sprite(SpriteComponent::new(TextureId(2)))
            .with_label(LabelComponent::new("Next", 30.0))];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].width, 350.0);
        let label = buffer.label("Next").unwrap();
        assert_eq!(label.x, 640.0);
    }

    #[test]
    fn inactive_entities_and_empty_text_are_skipped() {
        let mut hidden = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        hidden.active = false;
        let blank = Entity::new(EntityId(2)).with_label(LabelComponent::new("", 12.0));

        let entities = vec![hidden, blank];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
        assert!(buffer.labels.is_empty());
    }
}
