use godot::classes::base_material_3d::{TextureParam, Transparency};
use godot::classes::image::Format;
use godot::classes::mesh::PrimitiveType;
use godot::classes::rendering_server::ArrayType;
use godot::classes::{
    ArrayMesh, IMeshInstance3D, Image, ImageTexture, Material, MeshInstance3D, StandardMaterial3D,
};
use godot::prelude::*;

use crate::mesh_builder::SectionId;
use crate::renderer::{SectionUpload, TerrainRenderer};
use crate::terrain::DestructibleTerrain;
use crate::texture_sync::TextureRegion;

type VariantArray = Array<Variant>;

/// Destructible terrain node: owns a `DestructibleTerrain` and mirrors it into an ArrayMesh.
#[derive(GodotClass)]
#[class(base=MeshInstance3D, init, tool)]
pub struct CarveTerrain {
    base: Base<MeshInstance3D>,

    /// Grid size in cells (x = width, y = height along Z)
    #[export]
    #[var(get, set = set_grid_size)]
    #[init(val = Vector2i::new(32, 32))]
    grid_size: Vector2i,

    /// Material applied to the wall surface
    #[export]
    #[var(get, set = set_wall_material)]
    wall_material: Option<Gd<Material>>,

    terrain: Option<DestructibleTerrain>,
}

#[godot_api]
impl IMeshInstance3D for CarveTerrain {
    fn ready(&mut self) {
        self.configure_from_grid_size();
    }
}

#[godot_api]
impl CarveTerrain {
    #[func]
    fn set_grid_size(&mut self, size: Vector2i) {
        self.grid_size = size;
        if self.base().is_inside_tree() {
            self.configure_from_grid_size();
        }
    }

    #[func]
    fn set_wall_material(&mut self, material: Option<Gd<Material>>) {
        self.wall_material = material;
        self.apply_wall_material();
    }

    /// Clear the rectangle centred on `center` (X/Z used) with full extent `size`.
    #[func]
    fn carve_rectangle(&mut self, center: Vector3, size: Vector3) {
        if let Some(terrain) = self.terrain.as_mut() {
            terrain.carve_rectangle([center.x, center.z], [size.x, size.z]);
        }
        self.publish();
    }

    /// Clear every cell strictly within `diameter / 2` of `center` (X/Z used).
    #[func]
    fn carve_circle(&mut self, center: Vector3, diameter: f32) {
        if let Some(terrain) = self.terrain.as_mut() {
            terrain.carve_circle([center.x, center.z], diameter);
        }
        self.publish();
    }

    #[func]
    fn regenerate(&mut self) {
        if let Some(terrain) = self.terrain.as_mut() {
            terrain.on_edit();
        }
        self.publish();
    }

    #[func]
    fn is_solid(&self, x: i32, z: i32) -> bool {
        self.terrain
            .as_ref()
            .and_then(|t| t.grid().is_solid(x, z).ok())
            .unwrap_or(false)
    }
}

impl CarveTerrain {
    fn configure_from_grid_size(&mut self) {
        let (width, height) = (self.grid_size.x.max(0) as usize, self.grid_size.y.max(0) as usize);
        let result = if let Some(terrain) = self.terrain.as_mut() {
            terrain.on_configure(width, height)
        } else {
            DestructibleTerrain::with_dimensions(width, height).map(|terrain| {
                self.terrain = Some(terrain);
            })
        };

        match result {
            Ok(()) => {
                godot_print!("CarveTerrain: configured {}x{} grid", width, height);
                self.publish();
            }
            Err(err) => godot_warn!("CarveTerrain: {}", err),
        }
    }

    fn publish(&mut self) {
        let Some(terrain) = self.terrain.as_ref() else {
            return;
        };

        let mut renderer = ArrayMeshRenderer::new();
        terrain.publish(&mut renderer);
        self.base_mut().set_mesh(&renderer.mesh);
        self.apply_wall_material();
    }

    fn apply_wall_material(&mut self) {
        let Some(material) = self.wall_material.clone() else {
            return;
        };
        if let Some(mut mesh) = self
            .base()
            .get_mesh()
            .and_then(|m| m.try_cast::<ArrayMesh>().ok())
        {
            let surface = mesh.surface_find_by_name(SectionId::Walls.name());
            if surface >= 0 {
                mesh.surface_set_material(surface, &material);
            }
        }
    }
}

/// Renderer that writes each section as one ArrayMesh surface.
struct ArrayMeshRenderer {
    mesh: Gd<ArrayMesh>,
}

impl ArrayMeshRenderer {
    fn new() -> Self {
        Self {
            mesh: ArrayMesh::new_gd(),
        }
    }
}

impl TerrainRenderer for ArrayMeshRenderer {
    fn clear_sections(&mut self) {
        self.mesh.clear_surfaces();
    }

    fn create_section(&mut self, upload: SectionUpload<'_>) {
        // Godot rejects empty surfaces
        if upload.vertices.is_empty() {
            return;
        }

        let mut vertices = PackedVector3Array::new();
        let mut normals = PackedVector3Array::new();
        let mut uvs = PackedVector2Array::new();
        for v in upload.vertices {
            vertices.push(Vector3::new(v.position[0], v.position[1], v.position[2]));
            normals.push(Vector3::new(v.normal[0], v.normal[1], v.normal[2]));
            uvs.push(Vector2::new(v.uv[0], v.uv[1]));
        }
        let mut indices = PackedInt32Array::new();
        for &i in upload.indices {
            indices.push(i as i32);
        }

        // Surface arrays need every slot up to MAX
        let num_arrays = ArrayType::MAX.ord() as usize;
        let mut arrays: VariantArray = VariantArray::new();
        for i in 0..num_arrays {
            if i == ArrayType::VERTEX.ord() as usize {
                arrays.push(&vertices.to_variant());
            } else if i == ArrayType::NORMAL.ord() as usize {
                arrays.push(&normals.to_variant());
            } else if i == ArrayType::TEX_UV.ord() as usize {
                arrays.push(&uvs.to_variant());
            } else if i == ArrayType::INDEX.ord() as usize {
                arrays.push(&indices.to_variant());
            } else {
                arrays.push(&Variant::nil());
            }
        }
        let surface = self.mesh.get_surface_count();
        self.mesh
            .add_surface_from_arrays(PrimitiveType::TRIANGLES, &arrays);
        self.mesh.surface_set_name(surface, upload.id.name());
        if upload.collision {
            self.mesh.set_meta("collision_surface", &surface.to_variant());
        }
    }

    fn update_texture(&mut self, pixels: &[u8], region: TextureRegion) {
        let data = PackedByteArray::from(pixels);
        let Some(image) = Image::create_from_data(
            region.width as i32,
            region.height as i32,
            false,
            Format::RGBA8,
            &data,
        ) else {
            godot_warn!("CarveTerrain: map texture upload failed");
            return;
        };
        let Some(texture) = ImageTexture::create_from_image(&image) else {
            return;
        };

        let mut material = StandardMaterial3D::new_gd();
        material.set_texture(TextureParam::ALBEDO, &texture);
        material.set_transparency(Transparency::ALPHA);
        let front = self.mesh.surface_find_by_name(SectionId::Front.name());
        if front >= 0 {
            self.mesh.surface_set_material(front, &material);
        }
    }
}
